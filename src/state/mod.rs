//! Application state module

mod attendee;
mod focus;
mod invitation;
mod payload;
mod validation;

pub use attendee::*;
pub use focus::*;
pub use invitation::*;
pub use payload::*;
pub use validation::*;
