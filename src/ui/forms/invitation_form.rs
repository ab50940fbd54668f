//! Invitation edit view

use super::field_renderer::{draw_selector, draw_text_field, FieldState};
use crate::app::App;
use crate::state::{Attendee, FieldErrors, FormFocus};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;
const COMPANION_HEIGHT: u16 = FIELD_HEIGHT * 2 + 2;
const MESSAGE_HEIGHT: u16 = 6;

/// Vertical slot of the edit view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    PrimaryName,
    PrimaryAge,
    CompanionsLabel,
    Companion(usize),
    AddCompanion,
    Message,
    Submit,
}

impl Row {
    fn height(self) -> u16 {
        match self {
            Row::PrimaryName | Row::PrimaryAge => FIELD_HEIGHT,
            Row::CompanionsLabel => 1,
            Row::Companion(_) => COMPANION_HEIGHT,
            Row::AddCompanion | Row::Submit => BUTTON_HEIGHT,
            Row::Message => MESSAGE_HEIGHT,
        }
    }

    fn for_focus(focus: FormFocus) -> Self {
        match focus {
            FormFocus::PrimaryName => Row::PrimaryName,
            FormFocus::PrimaryAge => Row::PrimaryAge,
            FormFocus::CompanionName(i) | FormFocus::CompanionAge(i) => Row::Companion(i),
            FormFocus::AddCompanion => Row::AddCompanion,
            FormFocus::Message => Row::Message,
            FormFocus::Submit => Row::Submit,
        }
    }
}

fn rows(companions: usize) -> Vec<Row> {
    let mut rows = vec![Row::PrimaryName, Row::PrimaryAge];
    if companions > 0 {
        rows.push(Row::CompanionsLabel);
        rows.extend((0..companions).map(Row::Companion));
    }
    rows.extend([Row::AddCompanion, Row::Message, Row::Submit]);
    rows
}

/// First row to draw so the focused row fits in `height`
fn scroll_start(rows: &[Row], focused: usize, height: u16) -> usize {
    let mut start = 0;
    while start < focused
        && rows[start..=focused].iter().map(|r| r.height()).sum::<u16>() > height
    {
        start += 1;
    }
    // Keep the section label attached to the first companion
    if start > 0
        && rows[start - 1] == Row::CompanionsLabel
        && matches!(rows[start], Row::Companion(0))
    {
        let with_label: u16 = rows[start - 1..=focused].iter().map(|r| r.height()).sum();
        if with_label <= height {
            start -= 1;
        }
    }
    start
}

/// Draw the RSVP form
pub fn draw_invitation_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Confirme sua presença ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = app.controller.form();
    let locked = !app.controller.is_editable();
    let rows = rows(form.companions.len());
    let focused_row = Row::for_focus(app.focus);
    let focused = rows.iter().position(|r| *r == focused_row).unwrap_or(0);
    let start = scroll_start(&rows, focused, inner.height);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for row in &rows[start..] {
        let height = row.height();
        if y + height > bottom {
            break;
        }
        let slot = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        draw_row(frame, slot, app, *row, locked);
        y += height;
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, row: Row, locked: bool) {
    let form = app.controller.form();
    let state = |focus: FormFocus, has_error: bool| FieldState {
        is_active: app.focus == focus,
        has_error,
        is_locked: locked,
    };

    match row {
        Row::PrimaryName => draw_text_field(
            frame,
            area,
            "Nome",
            &form.primary.name,
            "Seu nome",
            false,
            state(FormFocus::PrimaryName, form.primary_errors.name),
        ),
        Row::PrimaryAge => draw_selector(
            frame,
            area,
            "Idade",
            form.primary.age_bracket.map(|b| b.label()),
            "Sua idade",
            state(FormFocus::PrimaryAge, form.primary_errors.age),
        ),
        Row::CompanionsLabel => {
            let label = Line::from(Span::styled(
                " Acompanhantes",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(label), area);
        }
        Row::Companion(i) => {
            if let Some(entry) = form.companions.get(i) {
                draw_companion(frame, area, app, i, &entry.attendee, entry.errors, locked);
            }
        }
        Row::AddCompanion => render_button(
            frame,
            area,
            "+ Adicionar Acompanhante",
            app.focus == FormFocus::AddCompanion,
            !locked,
            Color::Blue,
        ),
        Row::Message => draw_text_field(
            frame,
            area,
            "Mensagem",
            &form.message,
            "Deixe uma mensagem especial para a aniversariante ✨",
            true,
            state(FormFocus::Message, false),
        ),
        Row::Submit => {
            let label = if app.controller.is_submitting() {
                "Enviando..."
            } else {
                "Confirmar Presença"
            };
            render_button(
                frame,
                area,
                label,
                app.focus == FormFocus::Submit,
                !locked,
                Color::Green,
            );
        }
    }
}

fn draw_companion(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    index: usize,
    attendee: &Attendee,
    errors: FieldErrors,
    locked: bool,
) {
    let has_focus = matches!(
        app.focus,
        FormFocus::CompanionName(i) | FormFocus::CompanionAge(i) if i == index
    );
    let block = Block::default()
        .title(format!(" Acompanhante {} ", index + 1))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if has_focus {
            Color::Blue
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Name
            Constraint::Length(FIELD_HEIGHT), // Age
        ])
        .split(inner);

    draw_text_field(
        frame,
        chunks[0],
        "Nome",
        &attendee.name,
        "Nome do acompanhante",
        false,
        FieldState {
            is_active: app.focus == FormFocus::CompanionName(index),
            has_error: errors.name,
            is_locked: locked,
        },
    );
    draw_selector(
        frame,
        chunks[1],
        "Idade",
        attendee.age_bracket.map(|b| b.label()),
        "Idade",
        FieldState {
            is_active: app.focus == FormFocus::CompanionAge(index),
            has_error: errors.age,
            is_locked: locked,
        },
    );
}
