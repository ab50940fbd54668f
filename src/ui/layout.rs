//! Screen layout: event header, centered content column, status bar

use crate::app::App;
use crate::state::SubmissionStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header rows (borders included)
pub const HEADER_HEIGHT: u16 = 7;
/// Widest the content column grows
const CONTENT_MAX_WIDTH: u16 = 72;

/// Split the screen into header, body and status bar areas
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let width = area.width.min(CONTENT_MAX_WIDTH);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Event header
            Constraint::Min(0),                // Form or confirmation
            Constraint::Length(1),             // Status bar
        ])
        .split(column);

    let status_area = Rect {
        x: area.x,
        y: chunks[2].y,
        width: area.width,
        height: 1,
    };

    (chunks[0], chunks[1], status_area)
}

/// Draw event title and details
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let config = &app.config;
    let lines = vec![
        Line::from(vec![
            Span::styled("❄ ", Style::default().fg(Color::LightBlue)),
            Span::styled(
                config.event_title(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ❄", Style::default().fg(Color::LightBlue)),
        ]),
        Line::from(Span::styled(
            config.event_subtitle(),
            Style::default().fg(Color::LightBlue),
        )),
        Line::from(""),
        Line::from(format!("Data: {}", config.event_date())),
        Line::from(format!("Local: {}", config.event_venue())),
    ];

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(header, area);
}

/// Key hints for the current state
fn get_hints(status: &SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Editing => {
            " Tab/↑↓: campos | ←→/Espaço: idade | Enter: ativar | Ctrl+S: enviar | Esc: sair "
        }
        SubmissionStatus::Submitting => " Enviando... aguarde a resposta ",
        SubmissionStatus::Failed(_) => " Enter/Esc: voltar ao formulário ",
        SubmissionStatus::Succeeded(_) => " q/Esc: sair ",
    }
}

/// Draw the bottom status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        get_hints(app.controller.status()),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        let color = if app.controller.is_submitted() || app.controller.is_submitting() {
            Color::Green
        } else {
            Color::Yellow
        };
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
