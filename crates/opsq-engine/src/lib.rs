//! Question-to-answer orchestration.
//!
//! The [`Engine`] owns the full pipeline for one question:
//!
//! ```text
//! question ──► QuestionRouter ──► ToolRequest
//!                                     │
//!                                     ▼
//!                          ClientSet (loki | prometheus)
//!                                     │
//!                                     ▼  raw result
//!                          Summarizer (best effort)
//!                                     │
//!                                     ▼
//!                                  Answer
//! ```
//!
//! Failures reduce to exactly two caller-visible categories: the question
//! could not be classified ([`EngineError::BadQuestion`]) or the routed
//! tool call failed ([`EngineError::Upstream`]). A summarizer failure is
//! neither — it is absorbed, and the raw tool result stands in for the
//! summary.

pub mod engine;
pub mod error;

// Re-export main types
pub use engine::{Answer, ClientSet, Engine};
pub use error::{EngineError, Result};
