//! Application state and core logic

use crate::config::InviteConfig;
use crate::state::{
    AgeBracket, AttendeeField, FormFocus, InvitationController, SubmissionStatus, SubmitBlocked,
    SubmitOutcome,
};
use crate::submit::{SubmissionClient, SubmitError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Main application struct
pub struct App {
    /// Form state and submission lifecycle
    pub controller: InvitationController,
    /// Event details and endpoint
    pub config: InviteConfig,
    /// Focused element of the edit view
    pub focus: FormFocus,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Where RSVPs are sent
    client: Arc<dyn SubmissionClient>,
    /// Results of background submissions
    results_tx: mpsc::UnboundedSender<Result<(), SubmitError>>,
    results_rx: mpsc::UnboundedReceiver<Result<(), SubmitError>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: InviteConfig, client: Arc<dyn SubmissionClient>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            controller: InvitationController::new(),
            config,
            focus: FormFocus::default(),
            status_message: None,
            client,
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.controller.status() {
            SubmissionStatus::Succeeded(_) => self.handle_confirmed_key(key),
            // Failure dialog is modal
            SubmissionStatus::Failed(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.controller.dismiss_failure();
                    self.status_message = Some("Tente enviar novamente.".to_string());
                }
            }
            // Keys are ignored until the request settles
            SubmissionStatus::Submitting => {}
            SubmissionStatus::Editing => self.handle_edit_key(key),
        }
    }

    /// Apply any submission results that arrived since the last tick
    pub fn poll_submission(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            match self.controller.finish_submission(result) {
                SubmitOutcome::Confirmed => {
                    self.status_message = Some("Presença confirmada!".to_string());
                }
                SubmitOutcome::Failed(_) => {
                    self.status_message = None;
                }
                SubmitOutcome::Blocked(_) | SubmitOutcome::Stale => {}
            }
        }
    }

    fn handle_confirmed_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
        ) {
            self.quit = true;
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        // Clear any status messages on key press
        self.status_message = None;
        let companions = self.controller.companion_count();

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.start_submission();
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(companions),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(companions),
            KeyCode::Enter => match self.focus {
                FormFocus::AddCompanion => self.add_companion(),
                FormFocus::Submit => self.start_submission(),
                FormFocus::Message => self.edit_focused_text(|s| s.push('\n')),
                _ => self.focus = self.focus.next(companions),
            },
            KeyCode::Left if self.focus.is_age_selector() => {
                self.cycle_focused_age(AgeBracket::cycle_prev);
            }
            KeyCode::Right | KeyCode::Char(' ') if self.focus.is_age_selector() => {
                self.cycle_focused_age(AgeBracket::cycle_next);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused_text(|s| s.push(c));
            }
            KeyCode::Backspace => self.edit_focused_text(|s| {
                s.pop();
            }),
            _ => {}
        }
    }

    fn add_companion(&mut self) {
        match self.controller.add_companion() {
            Ok(index) => self.focus = FormFocus::CompanionName(index),
            Err(err) => debug!(%err, "add companion ignored"),
        }
    }

    /// Validate and, if the form is complete, send it in the background
    fn start_submission(&mut self) {
        match self.controller.begin_submission() {
            Ok(payload) => {
                let client = Arc::clone(&self.client);
                let tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let result = client.submit(payload).await;
                    let _ = tx.send(result);
                });
                self.status_message = Some("Enviando confirmação...".to_string());
            }
            Err(SubmitBlocked::Invalid(count)) => {
                self.focus = self.first_invalid_focus().unwrap_or(self.focus);
                self.status_message = Some(if count == 1 {
                    "Preencha o campo destacado.".to_string()
                } else {
                    format!("Preencha os {count} campos destacados.")
                });
            }
            Err(blocked) => debug!(?blocked, "submission not started"),
        }
    }

    /// First field flagged by the last validation pass, in tab order
    fn first_invalid_focus(&self) -> Option<FormFocus> {
        let form = self.controller.form();
        if form.primary_errors.name {
            return Some(FormFocus::PrimaryName);
        }
        if form.primary_errors.age {
            return Some(FormFocus::PrimaryAge);
        }
        form.companions
            .iter()
            .enumerate()
            .find_map(|(i, entry)| match (entry.errors.name, entry.errors.age) {
                (true, _) => Some(FormFocus::CompanionName(i)),
                (false, true) => Some(FormFocus::CompanionAge(i)),
                _ => None,
            })
    }

    /// Apply an edit to the focused text field (name or message)
    fn edit_focused_text(&mut self, edit: impl FnOnce(&mut String)) {
        let form = self.controller.form();
        let result = match self.focus {
            FormFocus::PrimaryName => {
                let mut name = form.primary.name.clone();
                edit(&mut name);
                self.controller.update_primary_field(AttendeeField::Name, &name)
            }
            FormFocus::CompanionName(i) => {
                let Some(entry) = form.companions.get(i) else {
                    return;
                };
                let mut name = entry.attendee.name.clone();
                edit(&mut name);
                self.controller
                    .update_companion_field(i, AttendeeField::Name, &name)
            }
            FormFocus::Message => {
                let mut message = form.message.clone();
                edit(&mut message);
                self.controller.set_message(&message)
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            debug!(%err, "edit ignored");
        }
    }

    /// Move the focused age selector one step
    fn cycle_focused_age(&mut self, step: fn(Option<AgeBracket>) -> Option<AgeBracket>) {
        let form = self.controller.form();
        let result = match self.focus {
            FormFocus::PrimaryAge => {
                let value = step(form.primary.age_bracket).map(AgeBracket::wire_value);
                self.controller
                    .update_primary_field(AttendeeField::AgeBracket, value.unwrap_or(""))
            }
            FormFocus::CompanionAge(i) => {
                let Some(entry) = form.companions.get(i) else {
                    return;
                };
                let value = step(entry.attendee.age_bracket).map(AgeBracket::wire_value);
                self.controller
                    .update_companion_field(i, AttendeeField::AgeBracket, value.unwrap_or(""))
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            debug!(%err, "edit ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Attendee;
    use crate::submit::MockSubmissionClient;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with(client: MockSubmissionClient) -> App {
        App::new(InviteConfig::default(), Arc::new(client))
    }

    fn idle_app() -> App {
        let mut client = MockSubmissionClient::new();
        client.expect_submit().never();
        app_with(client)
    }

    fn fill_primary(app: &mut App) {
        type_text(app, "Ana");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right));
    }

    async fn wait_for_result(app: &mut App) {
        for _ in 0..100 {
            app.poll_submission();
            if !app.controller.is_submitting() {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_typing_fills_primary_name() {
        let mut app = idle_app();
        type_text(&mut app, "Anna");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.controller.form().primary.name, "Ann");
    }

    #[test]
    fn test_age_selector_cycles() {
        let mut app = idle_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, FormFocus::PrimaryAge);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(
            app.controller.form().primary.age_bracket,
            Some(AgeBracket::FiveToTen)
        );
        app.handle_key(key(KeyCode::Left));
        assert_eq!(
            app.controller.form().primary.age_bracket,
            Some(AgeBracket::UpToFive)
        );
    }

    #[test]
    fn test_typing_on_age_selector_is_ignored() {
        let mut app = idle_app();
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "abc");
        assert_eq!(app.controller.form().primary, Attendee::default());
    }

    #[test]
    fn test_add_companion_button_focuses_new_companion() {
        let mut app = idle_app();
        app.focus = FormFocus::AddCompanion;
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.controller.companion_count(), 1);
        assert_eq!(app.focus, FormFocus::CompanionName(0));
        type_text(&mut app, "Leo");
        assert_eq!(app.controller.form().companions[0].attendee.name, "Leo");
    }

    #[test]
    fn test_message_accepts_newlines() {
        let mut app = idle_app();
        app.focus = FormFocus::Message;
        type_text(&mut app, "Oi");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Tchau");
        assert_eq!(app.controller.form().message, "Oi\nTchau");
    }

    #[test]
    fn test_invalid_submit_focuses_first_error() {
        let mut app = idle_app();
        type_text(&mut app, "Ana");
        app.focus = FormFocus::Message;
        app.handle_key(ctrl('s'));

        assert_eq!(app.focus, FormFocus::PrimaryAge);
        assert!(app.controller.form().primary_errors.age);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Preencha o campo destacado.")
        );
    }

    #[test]
    fn test_escape_ignored_while_submitting() {
        let mut app = idle_app();
        app.controller
            .update_primary_field(AttendeeField::Name, "Ana")
            .unwrap();
        app.controller
            .update_primary_field(AttendeeField::AgeBracket, "0 a 5 anos")
            .unwrap();
        app.controller.begin_submission().unwrap();

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.should_quit());
        assert!(app.controller.is_submitting());
    }

    #[test]
    fn test_escape_quits_while_editing() {
        let mut app = idle_app();
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_submit_button_confirms() {
        let mut client = MockSubmissionClient::new();
        client.expect_submit().times(1).returning(|_| Ok(()));
        let mut app = app_with(client);
        fill_primary(&mut app);

        app.focus = FormFocus::Submit;
        app.handle_key(key(KeyCode::Enter));
        assert!(app.controller.is_submitting());

        // Edits are locked while the request is in flight
        app.handle_key(key(KeyCode::Enter));

        wait_for_result(&mut app).await;
        assert!(app.controller.is_submitted());
        let confirmation = app.controller.confirmation().unwrap();
        assert_eq!(confirmation.primary.name, "Ana");
        assert_eq!(confirmation.primary.age_bracket, Some(AgeBracket::UpToFive));

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_failure_dialog_then_retry() {
        let mut client = MockSubmissionClient::new();
        let mut calls = 0;
        client.expect_submit().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(SubmitError::Status(500))
            } else {
                Ok(())
            }
        });
        let mut app = app_with(client);
        fill_primary(&mut app);

        app.handle_key(ctrl('s'));
        wait_for_result(&mut app).await;
        assert!(matches!(
            app.controller.status(),
            SubmissionStatus::Failed(_)
        ));

        // Typing is swallowed by the modal dialog
        type_text(&mut app, "x");
        assert_eq!(app.controller.form().primary.name, "Ana");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller.status(), &SubmissionStatus::Editing);

        app.handle_key(ctrl('s'));
        wait_for_result(&mut app).await;
        assert!(app.controller.is_submitted());
    }
}
