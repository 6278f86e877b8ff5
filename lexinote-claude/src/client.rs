//! HTTP client for the Anthropic Messages API

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{ClaudeError, Result};
use crate::provider::CompletionProvider;
use crate::types::{ContentBlock, ErrorEnvelope, MessageParam, MessagesRequest, MessagesResponse};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
///
/// Holds the credentials and model name for the process lifetime; each
/// [`complete`](CompletionProvider::complete) call is an independent blocking
/// request with no retry.
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeClient {
    /// Creates a client for the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL. Used by tests to point the client at a
    /// local stand-in server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionProvider for ClaudeClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens,
            messages: vec![MessageParam {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(
            model = %self.model,
            max_tokens,
            prompt_chars = prompt.chars().count(),
            "sending messages request"
        );

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(ClaudeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesResponse = response.json().await?;

        if let Some(usage) = &reply.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = ?reply.stop_reason,
                "messages request finished"
            );
        }

        reply
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(ClaudeError::EmptyReply)
    }
}
