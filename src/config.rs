//! Configuration handling for the TUI

use crate::submit::DEFAULT_ENDPOINT;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the form endpoint
pub const ENDPOINT_ENV: &str = "INVITE_FORM_ENDPOINT";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InviteConfig {
    /// Form-collection endpoint
    pub endpoint: Option<String>,
    /// Request timeout in seconds (no timeout when absent)
    pub timeout_secs: Option<u64>,
    /// Event title shown in the header
    pub event_title: Option<String>,
    /// Line under the title
    pub event_subtitle: Option<String>,
    /// Date and time line
    pub event_date: Option<String>,
    /// Venue line
    pub event_venue: Option<String>,
}

impl InviteConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "convite", "invite-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "convite", "invite-tui")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = Some(endpoint);
            }
        }

        Ok(config)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn event_title(&self) -> &str {
        self.event_title.as_deref().unwrap_or("Festa Frozen")
    }

    pub fn event_subtitle(&self) -> &str {
        self.event_subtitle
            .as_deref()
            .unwrap_or("Você está convidado para uma aventura mágica!")
    }

    pub fn event_date(&self) -> &str {
        self.event_date
            .as_deref()
            .unwrap_or("20 de Abril de 2025 • 14:00")
    }

    pub fn event_venue(&self) -> &str {
        self.event_venue
            .as_deref()
            .unwrap_or("Buffet Mundo Mágico, Rua das Flores, 123")
    }
}
