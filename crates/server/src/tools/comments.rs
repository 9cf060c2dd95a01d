//! Comment thread tool for the watch page.

use mytube_core::comments::{sample_thread, thread_total};
use mytube_core::{Comment, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::context::AppContext;

/// Parameters for the video_comments tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoCommentsParams {
    pub video_id: String,
}

/// Output of the video_comments tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoCommentsOutput {
    pub video_id: String,
    /// Top-level comments.
    pub count: usize,
    /// Every comment including nested replies.
    pub total: usize,
    pub comments: Vec<Comment>,
}

/// Implementation of the video_comments tool.
pub async fn comments_impl(_ctx: &AppContext, params: VideoCommentsParams) -> Result<CallToolResult, McpError> {
    let video_id = params.video_id.trim();
    if video_id.is_empty() {
        return Err(Error::InvalidInput("video_id cannot be empty".into()).into());
    }

    let comments = sample_thread();
    json_result(&VideoCommentsOutput {
        video_id: video_id.to_string(),
        count: comments.len(),
        total: thread_total(&comments),
        comments,
    })
}
