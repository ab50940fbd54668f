//! UI module for rendering the TUI

mod components;
mod confirmation;
mod forms;
mod layout;

use crate::app::App;
use crate::state::SubmissionStatus;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, body_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Edit and confirmation views are mutually exclusive
    match app.controller.confirmation() {
        Some(snapshot) => confirmation::draw(frame, body_area, snapshot),
        None => forms::draw_invitation_form(frame, body_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    if let SubmissionStatus::Failed(message) = app.controller.status() {
        components::render_error_dialog(frame, message);
    }
}
