//! Error types for question routing.

use thiserror::Error;

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Error type for routing operations.
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// No rule matched the question. Carries the original text so the
    /// caller can report what it failed to classify.
    #[error("no deterministic route matched this question")]
    NoMatch {
        /// The question as it was received, before normalization.
        question: String,
    },
}

impl RouteError {
    /// Create a no-match error for a question.
    pub fn no_match(question: impl Into<String>) -> Self {
        RouteError::NoMatch {
            question: question.into(),
        }
    }
}
