//! Submission to the external form-collection endpoint

mod client;
mod traits;

pub use client::{FormspreeClient, SubmitError, DEFAULT_ENDPOINT};
pub use traits::SubmissionClient;

#[cfg(test)]
pub use traits::MockSubmissionClient;
