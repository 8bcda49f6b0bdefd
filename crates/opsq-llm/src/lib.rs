//! Best-effort summarization of raw tool output.
//!
//! The [`Summarizer`] trait is the seam between the answer pipeline and
//! whatever model backs it: implementations may fail freely, and the
//! caller is expected to fall back to the raw tool result rather than
//! surface the failure. [`OllamaSummarizer`] is the production
//! implementation, speaking Ollama's native `/api/generate` endpoint;
//! [`MockSummarizer`] scripts replies for tests.

pub mod error;
pub mod ollama;
pub mod summarizer;

// Re-export main types
pub use error::{LlmError, Result};
pub use ollama::{OllamaConfig, OllamaSummarizer};
pub use summarizer::{MockSummarizer, SharedSummarizer, Summarizer};
