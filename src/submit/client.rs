//! HTTP client for the form-collection endpoint
//!
//! Posts the RSVP as a JSON object. Any 2xx response counts as accepted;
//! everything else is reported as a `SubmitError`.

use super::traits::SubmissionClient;
use crate::state::SubmissionPayload;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default form endpoint
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/mpwprkry";

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("falha de conexão: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("o servidor respondeu com status {0}")]
    Status(u16),
}

/// Client for a Formspree-style JSON form endpoint
pub struct FormspreeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FormspreeClient {
    /// Create a new client. `timeout` bounds the whole request when set.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for FormspreeClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmitError> {
        debug!(
            endpoint = %self.endpoint,
            companions = payload.companions.len(),
            "posting rsvp"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "rsvp accepted");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "rsvp rejected by endpoint");
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}
