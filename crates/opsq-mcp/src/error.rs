//! Error types for MCP operations.

use thiserror::Error;

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;

/// Error type for MCP operations.
#[derive(Debug, Error)]
pub enum McpError {
    /// The server answered `initialize` without a session id header.
    #[error("{server} did not return an MCP session id")]
    SessionMissing {
        /// Server name from the client configuration.
        server: String,
    },

    /// The response body carried no `data: ` event line.
    #[error("no MCP event payload found in response")]
    NoEventPayload,

    /// Transport failure or a tool-reported error. Calls are single
    /// attempt; the first failing step aborts the whole call.
    #[error("tool call failed: {0}")]
    ToolCallFailed(String),

    /// A configured base URL that does not parse.
    #[error("invalid server URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// Parse failure detail.
        source: url::ParseError,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// Create a tool-call failure with a message.
    pub fn tool_call_failed(message: impl Into<String>) -> Self {
        McpError::ToolCallFailed(message.into())
    }

    /// Create a session-missing error for a server.
    pub fn session_missing(server: impl Into<String>) -> Self {
        McpError::SessionMissing {
            server: server.into(),
        }
    }
}

impl From<reqwest::Error> for McpError {
    fn from(err: reqwest::Error) -> Self {
        McpError::ToolCallFailed(err.to_string())
    }
}
