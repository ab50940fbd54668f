//! Trait abstraction for the submission collaborator to enable mocking in tests

use super::client::SubmitError;
use crate::state::SubmissionPayload;
use async_trait::async_trait;

/// Sends one RSVP to wherever responses are collected
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Deliver the payload. `Ok` means the endpoint accepted it (2xx).
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmitError>;
}
