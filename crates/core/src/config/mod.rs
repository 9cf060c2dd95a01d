//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MYTUBE_*)
//! 2. TOML config file (if MYTUBE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MYTUBE_*)
/// 2. TOML config file (if MYTUBE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// YouTube Data API key.
    ///
    /// Set via MYTUBE_YOUTUBE_API_KEY environment variable.
    /// Required only when a video tool is called.
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// Base URL of the YouTube Data API v3.
    ///
    /// Set via MYTUBE_YOUTUBE_BASE_URL environment variable.
    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,

    /// Search suggestion endpoint.
    ///
    /// Set via MYTUBE_SUGGEST_URL environment variable.
    #[serde(default = "default_suggest_url")]
    pub suggest_url: String,

    /// ISO 3166-1 alpha-2 region used for charts and categories.
    ///
    /// Set via MYTUBE_REGION_CODE environment variable.
    #[serde(default = "default_region_code")]
    pub region_code: String,

    /// Maximum results per video listing (1-50).
    ///
    /// Set via MYTUBE_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via MYTUBE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MYTUBE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Quiet window before a suggestion fetch fires, in milliseconds.
    ///
    /// Set via MYTUBE_SUGGEST_DEBOUNCE_MS environment variable.
    #[serde(default = "default_suggest_debounce_ms")]
    pub suggest_debounce_ms: u64,

    /// Whether the simulated live chat feed runs.
    ///
    /// Set via MYTUBE_LIVE_CHAT_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub live_chat_enabled: bool,

    /// Interval between simulated chat messages in milliseconds.
    ///
    /// Set via MYTUBE_LIVE_CHAT_INTERVAL_MS environment variable.
    #[serde(default = "default_live_chat_interval_ms")]
    pub live_chat_interval_ms: u64,

    /// Keep only the newest N chat messages. Unset keeps everything.
    ///
    /// Set via MYTUBE_CHAT_RETAIN environment variable.
    #[serde(default)]
    pub chat_retain: Option<usize>,

    /// Author name used for messages sent without an explicit name.
    ///
    /// Set via MYTUBE_CHAT_DISPLAY_NAME environment variable.
    #[serde(default = "default_chat_display_name")]
    pub chat_display_name: String,

    /// Directory metrics reports are written to.
    ///
    /// Set via MYTUBE_METRICS_DIR environment variable.
    #[serde(default = "default_metrics_dir")]
    pub metrics_dir: PathBuf,
}

fn default_youtube_base_url() -> String {
    "https://youtube.googleapis.com/youtube/v3".into()
}

fn default_suggest_url() -> String {
    "https://suggestqueries.google.com/complete/search".into()
}

fn default_region_code() -> String {
    "IN".into()
}

fn default_max_results() -> u8 {
    50
}

fn default_user_agent() -> String {
    "mytube/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_suggest_debounce_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

fn default_live_chat_interval_ms() -> u64 {
    2_000
}

fn default_chat_display_name() -> String {
    "You".into()
}

fn default_metrics_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            youtube_base_url: default_youtube_base_url(),
            suggest_url: default_suggest_url(),
            region_code: default_region_code(),
            max_results: default_max_results(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            suggest_debounce_ms: default_suggest_debounce_ms(),
            live_chat_enabled: true,
            live_chat_interval_ms: default_live_chat_interval_ms(),
            chat_retain: None,
            chat_display_name: default_chat_display_name(),
            metrics_dir: default_metrics_dir(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Suggestion debounce window as Duration.
    pub fn suggest_debounce(&self) -> Duration {
        Duration::from_millis(self.suggest_debounce_ms)
    }

    /// Live chat tick interval as Duration.
    pub fn live_chat_interval(&self) -> Duration {
        Duration::from_millis(self.live_chat_interval_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MYTUBE_`
    /// 2. TOML file from `MYTUBE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MYTUBE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MYTUBE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the YouTube API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set or blank.
    pub fn require_youtube_api_key(&self) -> Result<&str, ConfigError> {
        self.youtube_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "youtube_api_key".into(),
                hint: "Set MYTUBE_YOUTUBE_API_KEY environment variable".into(),
            })
    }
}
