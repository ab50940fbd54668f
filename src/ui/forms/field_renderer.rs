//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// How a field should be decorated
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldState {
    pub is_active: bool,
    pub has_error: bool,
    pub is_locked: bool,
}

impl FieldState {
    fn border_style(self) -> Style {
        if self.has_error {
            Style::default().fg(Color::Red)
        } else if self.is_active && !self.is_locked {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn title(self, label: &str) -> String {
        if self.has_error {
            format!(" {label} · obrigatório ")
        } else {
            format!(" {label} ")
        }
    }

    fn show_cursor(self) -> bool {
        self.is_active && !self.is_locked
    }
}

/// Draw a text input; `placeholder` is shown while the value is empty
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_multiline: bool,
    state: FieldState,
) {
    let cursor = Span::styled(
        if state.show_cursor() { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );
    let placeholder_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let content = if value.is_empty() {
        Paragraph::new(Line::from(vec![
            cursor,
            Span::styled(placeholder, placeholder_style),
        ]))
        .wrap(Wrap { trim: false })
    } else if is_multiline {
        let width = usize::from(area.width.saturating_sub(2)).max(1);
        let mut rows: Vec<String> = value
            .split('\n')
            .flat_map(|line| hard_wrap(line, width))
            .collect();
        // Cursor moves to a fresh row when the last one is full
        if state.show_cursor() && rows.last().is_some_and(|r| r.chars().count() >= width) {
            rows.push(String::new());
        }
        let mut lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        // Keep the last row in view
        let visible = usize::from(area.height.saturating_sub(2));
        let hidden = u16::try_from(lines.len().saturating_sub(visible)).unwrap_or(u16::MAX);
        Paragraph::new(lines).scroll((hidden, 0))
    } else {
        Paragraph::new(Line::from(vec![Span::raw(value), cursor])).wrap(Wrap { trim: false })
    };

    let block = Block::default()
        .title(state.title(label))
        .borders(Borders::ALL)
        .border_style(state.border_style());

    frame.render_widget(content.block(block), area);
}

/// Split `text` into rows of at most `width` characters
fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|row| row.iter().collect()).collect()
}

/// Draw a single-choice selector showing the current option between arrows
pub fn draw_selector(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    placeholder: &str,
    state: FieldState,
) {
    let arrow_style = if state.show_cursor() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_span = match value {
        Some(v) => Span::raw(v.to_string()),
        None => Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        value_span,
        Span::styled(" ▶", arrow_style),
    ]);

    let block = Block::default()
        .title(state.title(label))
        .borders(Borders::ALL)
        .border_style(state.border_style());

    frame.render_widget(Paragraph::new(line).block(block), area);
}
