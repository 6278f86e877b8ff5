//! Error types for the Anthropic Messages API client

use thiserror::Error;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum ClaudeError {
    /// Transport-level failure before a reply was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Anthropic API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Message extracted from the error envelope, or the raw body
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reply carried no text content block
    #[error("reply contained no text content")]
    EmptyReply,
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClaudeError>;
