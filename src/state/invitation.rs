//! Invitation form state and the controller that drives it
//!
//! The controller owns the form, runs validation before every submission,
//! and tracks the request through an explicit status machine:
//! `Editing -> Submitting -> Succeeded | Failed`, with `Failed -> Editing`
//! when the user dismisses the failure.

use super::attendee::{Attendee, AttendeeField};
use super::payload::SubmissionPayload;
use super::validation::{validate, FieldErrors, Validation};
#[cfg(test)]
use crate::submit::SubmissionClient;
use crate::submit::SubmitError;
use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A companion together with its error flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionEntry {
    pub attendee: Attendee,
    pub errors: FieldErrors,
}

/// Everything the user has typed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationForm {
    pub primary: Attendee,
    pub primary_errors: FieldErrors,
    pub message: String,
    pub companions: Vec<CompanionEntry>,
}

impl InvitationForm {
    /// Append a companion with cleared error flags
    pub fn push_companion(&mut self, attendee: Attendee) {
        self.companions.push(CompanionEntry {
            attendee,
            errors: FieldErrors::default(),
        });
    }

    /// Overwrite every stored flag with the result of a validation pass
    pub fn apply_validation(&mut self, validation: &Validation) {
        debug_assert_eq!(validation.companions.len(), self.companions.len());
        self.primary_errors = validation.primary;
        for (entry, errors) in self.companions.iter_mut().zip(&validation.companions) {
            entry.errors = *errors;
        }
    }
}

/// Snapshot of a successful RSVP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub primary: Attendee,
    pub companions: Vec<Attendee>,
    pub message: String,
    pub confirmed_at: DateTime<Local>,
}

impl Confirmation {
    fn capture(form: &InvitationForm) -> Self {
        Self {
            primary: form.primary.clone(),
            companions: form
                .companions
                .iter()
                .map(|c| c.attendee.clone())
                .collect(),
            message: form.message.clone(),
            confirmed_at: Local::now(),
        }
    }
}

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Editing,
    Submitting,
    Succeeded(Confirmation),
    Failed(String),
}

/// Rejected edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("companion {index} does not exist ({len} companions)")]
    CompanionOutOfRange { index: usize, len: usize },
    #[error("the form cannot be edited while a submission is in flight or confirmed")]
    Locked,
}

/// Why `begin_submission` did not produce a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// Number of invalid fields
    Invalid(usize),
    InFlight,
    AlreadySubmitted,
}

/// Result of a full submit round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Blocked(SubmitBlocked),
    Confirmed,
    Failed(String),
    /// A result arrived with no submission in flight
    Stale,
}

/// Holds the form and drives validation and submission
#[derive(Debug, Default)]
pub struct InvitationController {
    form: InvitationForm,
    status: SubmissionStatus,
    pending: Option<Confirmation>,
}

impl InvitationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &InvitationForm {
        &self.form
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.status, SubmissionStatus::Succeeded(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Editing | SubmissionStatus::Failed(_)
        )
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.status {
            SubmissionStatus::Succeeded(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    pub fn companion_count(&self) -> usize {
        self.form.companions.len()
    }

    /// Set a primary attendee field verbatim. Existing error flags are kept
    /// until the next validation pass.
    pub fn update_primary_field(
        &mut self,
        field: AttendeeField,
        value: &str,
    ) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.form.primary.set(field, value);
        Ok(())
    }

    /// Set a field of the companion at `index`
    pub fn update_companion_field(
        &mut self,
        index: usize,
        field: AttendeeField,
        value: &str,
    ) -> Result<(), FormError> {
        self.ensure_editable()?;
        let len = self.form.companions.len();
        let entry = self
            .form
            .companions
            .get_mut(index)
            .ok_or(FormError::CompanionOutOfRange { index, len })?;
        entry.attendee.set(field, value);
        Ok(())
    }

    pub fn set_message(&mut self, value: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.form.message = value.to_string();
        Ok(())
    }

    /// Append a blank companion. Returns its index.
    pub fn add_companion(&mut self) -> Result<usize, FormError> {
        self.ensure_editable()?;
        self.form.push_companion(Attendee::default());
        let index = self.form.companions.len() - 1;
        debug!(index, "companion added");
        Ok(index)
    }

    /// Recompute validation without touching stored flags
    pub fn validate(&self) -> Validation {
        validate(&self.form)
    }

    /// Validate, and if everything is filled in, move to `Submitting` and
    /// return the request body.
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, SubmitBlocked> {
        match self.status {
            SubmissionStatus::Submitting => return Err(SubmitBlocked::InFlight),
            SubmissionStatus::Succeeded(_) => return Err(SubmitBlocked::AlreadySubmitted),
            SubmissionStatus::Editing | SubmissionStatus::Failed(_) => {}
        }

        let validation = self.validate();
        self.form.apply_validation(&validation);
        if validation.has_errors() {
            let count = validation.error_count();
            debug!(invalid_fields = count, "submission blocked by validation");
            self.status = SubmissionStatus::Editing;
            return Err(SubmitBlocked::Invalid(count));
        }

        self.pending = Some(Confirmation::capture(&self.form));
        self.status = SubmissionStatus::Submitting;
        Ok(SubmissionPayload::from_form(&self.form))
    }

    /// Record the result of the request started by `begin_submission`
    pub fn finish_submission(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        let Some(mut snapshot) = self.pending.take() else {
            warn!("submission result arrived with nothing in flight");
            return SubmitOutcome::Stale;
        };

        match result {
            Ok(()) => {
                snapshot.confirmed_at = Local::now();
                info!(
                    companions = snapshot.companions.len(),
                    "rsvp confirmed"
                );
                self.status = SubmissionStatus::Succeeded(snapshot);
                SubmitOutcome::Confirmed
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "rsvp submission failed");
                self.status = SubmissionStatus::Failed(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validate, send, and record the result in one go. The app splits this
    /// across `begin_submission` and `finish_submission` so the request can run
    /// in the background while the UI keeps drawing.
    #[cfg(test)]
    pub async fn submit(&mut self, client: &dyn SubmissionClient) -> SubmitOutcome {
        let payload = match self.begin_submission() {
            Ok(payload) => payload,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };
        let result = client.submit(payload).await;
        self.finish_submission(result)
    }

    /// Leave the failure state so the user can edit and retry
    pub fn dismiss_failure(&mut self) {
        if matches!(self.status, SubmissionStatus::Failed(_)) {
            self.status = SubmissionStatus::Editing;
        }
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(FormError::Locked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AgeBracket;
    use crate::submit::MockSubmissionClient;
    use pretty_assertions::assert_eq;

    fn valid_controller() -> InvitationController {
        let mut c = InvitationController::new();
        c.update_primary_field(AttendeeField::Name, "Ana").unwrap();
        c.update_primary_field(AttendeeField::AgeBracket, "0 a 5 anos")
            .unwrap();
        c.set_message("Parabéns!").unwrap();
        let i = c.add_companion().unwrap();
        c.update_companion_field(i, AttendeeField::Name, "Leo").unwrap();
        c.update_companion_field(i, AttendeeField::AgeBracket, "5 a 10 anos")
            .unwrap();
        c
    }

    fn accepting_client() -> MockSubmissionClient {
        let mut client = MockSubmissionClient::new();
        client.expect_submit().times(1).returning(|_| Ok(()));
        client
    }

    fn unused_client() -> MockSubmissionClient {
        let mut client = MockSubmissionClient::new();
        client.expect_submit().never();
        client
    }

    #[test]
    fn test_add_companion_keeps_lists_aligned() {
        let mut c = InvitationController::new();
        for n in 1..=5 {
            c.add_companion().unwrap();
            assert_eq!(c.companion_count(), n);
            assert_eq!(c.form().companions.iter().filter(|e| !e.errors.any()).count(), n);
            assert_eq!(c.validate().companions.len(), n);
        }
    }

    #[test]
    fn test_new_companion_is_blank_without_errors() {
        let mut c = InvitationController::new();
        let i = c.add_companion().unwrap();
        assert_eq!(c.form().companions[i], CompanionEntry::default());
    }

    #[test]
    fn test_update_does_not_clear_error_flags() {
        let mut c = InvitationController::new();
        assert!(matches!(
            c.begin_submission(),
            Err(SubmitBlocked::Invalid(2))
        ));
        assert!(c.form().primary_errors.name);

        c.update_primary_field(AttendeeField::Name, "Ana").unwrap();
        assert!(c.form().primary_errors.name);
    }

    #[test]
    fn test_companion_out_of_range() {
        let mut c = InvitationController::new();
        c.add_companion().unwrap();
        let err = c
            .update_companion_field(3, AttendeeField::Name, "Leo")
            .unwrap_err();
        assert_eq!(err, FormError::CompanionOutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn test_validation_replaces_flags_wholesale() {
        let mut c = InvitationController::new();
        c.add_companion().unwrap();
        let _ = c.begin_submission();
        assert!(c.form().companions[0].errors.name);

        c.update_companion_field(0, AttendeeField::Name, "Leo").unwrap();
        c.update_companion_field(0, AttendeeField::AgeBracket, "> 10 anos")
            .unwrap();
        let _ = c.begin_submission();
        assert_eq!(c.form().companions[0].errors, FieldErrors::default());
        assert!(c.form().primary_errors.name);
    }

    #[tokio::test]
    async fn test_valid_form_submits_once() {
        let mut c = valid_controller();
        let client = accepting_client();

        let outcome = c.submit(&client).await;
        assert_eq!(outcome, SubmitOutcome::Confirmed);
        assert!(c.is_submitted());
        assert!(!c.form().primary_errors.any());
    }

    #[tokio::test]
    async fn test_blank_primary_name_blocks_submission() {
        let mut c = valid_controller();
        c.update_primary_field(AttendeeField::Name, "   ").unwrap();
        let client = unused_client();

        let outcome = c.submit(&client).await;
        assert_eq!(outcome, SubmitOutcome::Blocked(SubmitBlocked::Invalid(1)));
        assert!(c.form().primary_errors.name);
        assert!(!c.is_submitted());
        assert_eq!(c.status(), &SubmissionStatus::Editing);
    }

    #[tokio::test]
    async fn test_empty_name_with_filled_companion() {
        let mut c = InvitationController::new();
        c.update_primary_field(AttendeeField::AgeBracket, "> 10 anos")
            .unwrap();
        let i = c.add_companion().unwrap();
        c.update_companion_field(i, AttendeeField::Name, "Leo").unwrap();
        c.update_companion_field(i, AttendeeField::AgeBracket, "5 a 10 anos")
            .unwrap();
        let client = unused_client();

        let outcome = c.submit(&client).await;
        assert!(matches!(outcome, SubmitOutcome::Blocked(SubmitBlocked::Invalid(1))));
        assert!(c.form().primary_errors.name);
        assert!(!c.form().primary_errors.age);
        assert_eq!(c.form().companions[0].errors, FieldErrors::default());
    }

    #[tokio::test]
    async fn test_success_snapshot_matches_form() {
        let mut c = valid_controller();
        let before = c.form().clone();
        let mut client = MockSubmissionClient::new();
        let expected = SubmissionPayload::from_form(&before);
        client
            .expect_submit()
            .withf(move |payload| *payload == expected)
            .times(1)
            .returning(|_| Ok(()));

        c.submit(&client).await;

        let confirmation = c.confirmation().unwrap();
        assert_eq!(confirmation.primary, before.primary);
        assert_eq!(confirmation.message, before.message);
        assert_eq!(
            confirmation.companions,
            vec![Attendee::new("Leo", Some(AgeBracket::FiveToTen))]
        );
    }

    #[tokio::test]
    async fn test_failure_is_distinct_state() {
        let mut c = valid_controller();
        let mut client = MockSubmissionClient::new();
        client
            .expect_submit()
            .times(1)
            .returning(|_| Err(SubmitError::Status(500)));

        let outcome = c.submit(&client).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(matches!(c.status(), SubmissionStatus::Failed(_)));
        assert!(!c.is_submitted());
        assert!(c.is_editable());

        c.dismiss_failure();
        assert_eq!(c.status(), &SubmissionStatus::Editing);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let mut c = valid_controller();
        let mut failing = MockSubmissionClient::new();
        failing
            .expect_submit()
            .times(1)
            .returning(|_| Err(SubmitError::Status(503)));
        c.submit(&failing).await;

        let outcome = c.submit(&accepting_client()).await;
        assert_eq!(outcome, SubmitOutcome::Confirmed);
    }

    #[test]
    fn test_in_flight_guard() {
        let mut c = valid_controller();
        assert!(c.begin_submission().is_ok());
        assert!(c.is_submitting());
        assert_eq!(c.begin_submission(), Err(SubmitBlocked::InFlight));
        assert_eq!(c.add_companion(), Err(FormError::Locked));
        assert_eq!(
            c.update_primary_field(AttendeeField::Name, "Bia"),
            Err(FormError::Locked)
        );
    }

    #[test]
    fn test_no_resubmission_after_success() {
        let mut c = valid_controller();
        c.begin_submission().unwrap();
        assert_eq!(c.finish_submission(Ok(())), SubmitOutcome::Confirmed);
        assert_eq!(c.begin_submission(), Err(SubmitBlocked::AlreadySubmitted));
        assert!(c.set_message("outra").is_err());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut c = valid_controller();
        assert_eq!(c.finish_submission(Ok(())), SubmitOutcome::Stale);
        assert_eq!(c.status(), &SubmissionStatus::Editing);
    }

    #[test]
    fn test_submit_with_block_on() {
        let mut c = valid_controller();
        let client = accepting_client();
        let outcome = tokio_test::block_on(c.submit(&client));
        assert_eq!(outcome, SubmitOutcome::Confirmed);
    }
}
