//! Form rendering module
//!
//! - `field_renderer`: text inputs and selectors with error styling
//! - `invitation_form`: the RSVP edit view

mod field_renderer;
mod invitation_form;

pub use invitation_form::draw_invitation_form;
