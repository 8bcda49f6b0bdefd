//! Error types for summarization.

use thiserror::Error;

/// Result type for summarization operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Error type for summarization operations.
///
/// None of these are fatal to an answer: the orchestrator absorbs every
/// summarizer failure and substitutes the raw tool result.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status from the generation API.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, when one was readable.
        message: String,
    },

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
