//! Completion capability trait
//!
//! Callers that only need "prompt in, text out" should depend on this trait
//! rather than on [`ClaudeClient`](crate::ClaudeClient) directly, so tests
//! can substitute canned replies.

use async_trait::async_trait;

use crate::errors::Result;

/// A single-prompt completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one free-form prompt and returns the model's reply text.
    ///
    /// `max_tokens` bounds the reply; the prompt itself is unbounded here and
    /// relies on the service's own input limit.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}
