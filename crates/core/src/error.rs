//! Unified error types for mytube.
//!
//! Every variant carries a stable code prefix and maps onto a JSON-RPC error code
//! when surfaced through the MCP server.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the mytube client and server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty search query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No video API key configured.
    #[error("API_KEY_MISSING: {0}")]
    MissingApiKey(String),

    /// Video API rejected the credentials.
    #[error("API_AUTH_ERROR: {0}")]
    ApiAuthError(String),

    /// Video API daily quota exhausted.
    #[error("API_QUOTA_EXCEEDED: {0}")]
    QuotaExceeded(String),

    /// Video API rate limited.
    #[error("API_RATE_LIMITED: {0}")]
    RateLimited(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Request timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Requested resource does not exist.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Metrics report could not be produced or written.
    #[error("REPORT_FAILED: {0}")]
    ReportFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::MissingApiKey(msg) => (-32009, msg.clone()),
            Error::ApiAuthError(msg) => (-32009, msg.clone()),
            Error::QuotaExceeded(msg) => (-32010, msg.clone()),
            Error::RateLimited(msg) => (-32010, msg.clone()),
            Error::ReportFailed(msg) => (-32012, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("abc123".to_string());
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("abc123"));

        let err = Error::MissingApiKey("set MYTUBE_YOUTUBE_API_KEY".to_string());
        assert!(err.to_string().starts_with("API_KEY_MISSING"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::NotFound("abc123".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let mcp_err: McpError = Error::InvalidInput("empty".into()).into();
        assert_eq!(mcp_err.code.0, -32602);
        assert_eq!(mcp_err.message, "empty");
    }
}
