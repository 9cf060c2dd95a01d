//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mytube server. Each tool
//! returns pretty-printed JSON text.

use mytube_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

pub mod chat;
pub mod comments;
pub mod metrics;
pub mod state;
pub mod suggest;
pub mod videos;

pub use chat::{ChatMessagesParams, ChatSendParams};
pub use comments::VideoCommentsParams;
pub use metrics::{MetricsDownloadParams, MetricsRunParams};
pub use state::NavigateParams;
pub use suggest::{SearchInputParams, SearchSuggestParams};
pub use videos::{VideoCategoriesParams, VideoDetailsParams, VideosListParams, VideosRelatedParams, VideosSearchParams};

/// Serialize a tool output as pretty-printed JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
