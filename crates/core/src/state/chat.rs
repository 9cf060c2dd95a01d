//! Live chat slice.

use serde::{Deserialize, Serialize};

use crate::model::ChatMessage;

/// Ordered chat log, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Optional cap; the oldest messages are dropped past it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain: Option<usize>,
}

impl ChatState {
    pub fn with_retention(retain: Option<usize>) -> Self {
        Self { messages: Vec::new(), retain }
    }

    pub fn add(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        if let Some(cap) = self.retain
            && self.messages.len() > cap
        {
            let overflow = self.messages.len() - cap;
            self.messages.drain(..overflow);
        }
        self
    }

    /// The newest `n` messages, oldest first.
    pub fn last(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }
}
