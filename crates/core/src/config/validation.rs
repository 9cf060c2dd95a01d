//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { .. } => crate::Error::MissingApiKey(err.to_string()),
            _ => crate::Error::InvalidInput(err.to_string()),
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_results` is outside 1-50
    /// - `suggest_debounce_ms` is 0 or exceeds 5 seconds
    /// - `live_chat_interval_ms` is less than 100ms
    /// - `chat_retain` is set to 0
    /// - `region_code` is not two ASCII letters
    /// - `user_agent` or `chat_display_name` is empty
    /// - either endpoint URL is not http(s)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if !(1..=50).contains(&self.max_results) {
            return Err(invalid("max_results", "must be between 1 and 50"));
        }

        if self.suggest_debounce_ms == 0 {
            return Err(invalid("suggest_debounce_ms", "must be greater than 0"));
        }
        if self.suggest_debounce_ms > 5_000 {
            return Err(invalid("suggest_debounce_ms", "must not exceed 5000ms"));
        }

        if self.live_chat_interval_ms < 100 {
            return Err(invalid("live_chat_interval_ms", "must be at least 100ms"));
        }

        if self.chat_retain == Some(0) {
            return Err(invalid("chat_retain", "must be at least 1 when set"));
        }

        if self.region_code.len() != 2 || !self.region_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("region_code", "must be an ISO 3166-1 alpha-2 code"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.chat_display_name.trim().is_empty() {
            return Err(invalid("chat_display_name", "must not be empty"));
        }

        for (field, value) in [("youtube_base_url", &self.youtube_base_url), ("suggest_url", &self.suggest_url)] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(invalid(field, "must be an http(s) URL"));
            }
        }

        if self.youtube_api_key.is_none() {
            tracing::warn!("youtube_api_key is not set; video tools will fail until it is configured");
        }

        Ok(())
    }
}
