//! Error types for orchestration.

use thiserror::Error;

use opsq_mcp::McpError;
use opsq_router::RouteError;

/// Result type for orchestration operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Caller-visible failure categories for one question.
///
/// Exactly two: bad input and upstream failure. Everything a tool call can
/// go wrong with (missing session, missing event payload, transport
/// errors, tool-reported errors) collapses into [`EngineError::Upstream`];
/// summarizer failures never appear here at all.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The question matched no routing rule. Nothing was attempted
    /// downstream.
    #[error(transparent)]
    BadQuestion(#[from] RouteError),

    /// The routed tool call failed.
    #[error(transparent)]
    Upstream(#[from] McpError),
}
