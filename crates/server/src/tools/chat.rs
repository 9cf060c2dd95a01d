//! Live chat tools.

use mytube_core::{Action, ChatMessage, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::context::AppContext;

/// Messages returned by chat_messages when `last` is omitted.
const DEFAULT_LAST: usize = 10;

/// Parameters for the chat_send tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChatSendParams {
    /// Author name; defaults to the configured display name.
    #[serde(default)]
    pub name: Option<String>,
    pub text: String,
}

/// Parameters for the chat_messages tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessagesParams {
    /// Newest N messages to return (default 10).
    #[serde(default)]
    pub last: Option<usize>,
}

/// Output of the chat_send tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatSendOutput {
    pub sent: ChatMessage,
    pub total: usize,
}

/// Output of the chat_messages tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessagesOutput {
    /// Oldest first.
    pub messages: Vec<ChatMessage>,
    pub total: usize,
}

/// Implementation of the chat_send tool.
pub async fn send_impl(ctx: &AppContext, params: ChatSendParams) -> Result<CallToolResult, McpError> {
    let text = params.text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput("message text cannot be empty".into()).into());
    }

    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&ctx.config.chat_display_name);

    let message = ChatMessage::new(name, text);
    ctx.store.dispatch(Action::AddMessage(message.clone()));

    let total = ctx.store.select(|s| s.chat.messages.len());
    json_result(&ChatSendOutput { sent: message, total })
}

/// Implementation of the chat_messages tool.
pub async fn messages_impl(ctx: &AppContext, params: ChatMessagesParams) -> Result<CallToolResult, McpError> {
    let last = params.last.unwrap_or(DEFAULT_LAST);
    let output = ctx.store.select(|s| ChatMessagesOutput {
        messages: s.chat.last(last).to_vec(),
        total: s.chat.messages.len(),
    });
    json_result(&output)
}
