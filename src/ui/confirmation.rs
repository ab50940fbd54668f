//! Confirmation view shown after a successful RSVP

use crate::state::Confirmation;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Lines echoing what was submitted
pub fn confirmation_lines(confirmation: &Confirmation) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("✨", Style::default().fg(Color::Green))),
        Line::from(""),
        Line::from(Span::styled(
            "Presença confirmada!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Obrigado por confirmar, {}! 💖", confirmation.primary.name),
            Style::default().fg(Color::Green),
        )),
        Line::from(format!(
            "Idade: {}",
            confirmation.primary.age_wire_value()
        )),
    ];

    if !confirmation.companions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Acompanhantes:",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )));
        for companion in &confirmation.companions {
            lines.push(Line::from(format!(
                "{} ({})",
                companion.name,
                companion.age_wire_value()
            )));
        }
    }

    if !confirmation.message.is_empty() {
        lines.push(Line::from(""));
        let italic = Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC);
        for line in confirmation.message.split('\n') {
            lines.push(Line::from(Span::styled(line.to_string(), italic)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Confirmado em {}",
            confirmation.confirmed_at.format("%d/%m/%Y %H:%M")
        ),
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

/// Draw the confirmation card
pub fn draw(frame: &mut Frame, area: Rect, confirmation: &Confirmation) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(confirmation_lines(confirmation))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(paragraph, area);
}
