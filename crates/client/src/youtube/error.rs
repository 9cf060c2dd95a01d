//! YouTube API client error types.

use std::sync::Arc;

/// Errors from the YouTube Data API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum YoutubeError {
    /// No API key configured.
    #[error("missing API key: MYTUBE_YOUTUBE_API_KEY not set")]
    MissingApiKey,

    /// Request parameters rejected before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid or restricted API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Daily quota exhausted.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// Rate limited by the API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for YoutubeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { YoutubeError::Timeout } else { YoutubeError::Network(Arc::new(err)) }
    }
}

impl From<YoutubeError> for mytube_core::Error {
    fn from(err: YoutubeError) -> Self {
        use mytube_core::Error;

        let message = err.to_string();
        match err {
            YoutubeError::MissingApiKey => Error::MissingApiKey(message),
            YoutubeError::InvalidRequest(_) => Error::InvalidInput(message),
            YoutubeError::AuthError => Error::ApiAuthError(message),
            YoutubeError::QuotaExceeded => Error::QuotaExceeded(message),
            YoutubeError::RateLimited => Error::RateLimited(message),
            YoutubeError::Timeout => Error::FetchTimeout(message),
            YoutubeError::HttpError { status: 404 } => Error::NotFound(message),
            YoutubeError::HttpError { .. } | YoutubeError::Network(_) | YoutubeError::Parse(_) => {
                Error::HttpError(message)
            }
        }
    }
}
