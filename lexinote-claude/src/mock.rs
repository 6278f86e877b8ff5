//! In-memory completion providers for tests
//!
//! [`MockProvider`] replays queued replies and records every prompt it
//! receives, so tests can assert both on parsed output and on prompt
//! construction. [`FailingProvider`] always fails, for exercising error
//! policies.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::{ClaudeError, Result};
use crate::provider::CompletionProvider;

/// Replays queued replies in order and records received prompts.
#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Creates a provider that will answer with `replies`, one per call.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock poisoned").clone()
    }

    /// Number of `complete` calls made against this provider.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("prompts lock poisoned").len()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompts lock poisoned")
            .push(prompt.to_string());

        self.replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front()
            .ok_or(ClaudeError::Api {
                status: 500,
                message: "mock provider has no reply queued".to_string(),
            })
    }
}

/// Fails every call with an upstream-shaped error.
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
        Err(ClaudeError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })
    }
}
