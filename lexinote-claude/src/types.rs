//! Wire types for the Anthropic Messages API

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/messages`
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model identifier, e.g. `claude-sonnet-4-20250514`
    pub model: String,
    /// Output-token budget for the reply
    pub max_tokens: u32,
    /// Conversation turns; a single user turn for one-shot prompts
    pub messages: Vec<MessageParam>,
}

/// One conversation turn in a request
#[derive(Debug, Clone, Serialize)]
pub struct MessageParam {
    /// `user` or `assistant`
    pub role: String,
    /// Plain-text content of the turn
    pub content: String,
}

/// Successful reply from `POST /v1/messages`
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Content blocks produced by the model
    pub content: Vec<ContentBlock>,
    /// Why generation stopped, when the API reports it
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Token accounting, when the API reports it
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One content block of a reply
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text produced by the model
    Text {
        /// The text itself
        text: String,
    },
    /// Any block type this client does not consume
    #[serde(other)]
    Other,
}

/// Token usage reported by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub input_tokens: u64,
    /// Tokens produced in the reply
    pub output_tokens: u64,
}

/// Error envelope returned on non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}
