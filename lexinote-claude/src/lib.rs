//! # Lexinote Claude client
//!
//! A small client for the Anthropic Messages API, sized for services that
//! send one free-form prompt and read back one block of text.
//!
//! The LLM call is modeled as the [`CompletionProvider`] capability trait so
//! that callers depend on `complete(prompt, max_tokens) -> text` rather than
//! on a concrete HTTP client. [`ClaudeClient`] is the real implementation;
//! [`mock`] holds in-memory implementations for tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexinote_claude::{ClaudeClient, CompletionProvider, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClaudeClient::new("sk-ant-...", "claude-sonnet-4-20250514");
//!     let reply = client.complete("Reply with one word: ping", 64).await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod client;
mod errors;
pub mod mock;
mod provider;
mod types;

pub use client::ClaudeClient;
pub use errors::{ClaudeError, Result};
pub use provider::CompletionProvider;
pub use types::{ContentBlock, MessageParam, MessagesRequest, MessagesResponse, Usage};
