//! MCP (Model Context Protocol) client for opsq.
//!
//! This crate implements the streamable HTTP flavor of MCP, just enough to
//! call tools on remote diagnostic servers. Each tool call is fully
//! self-contained: the client opens a fresh connection, performs the
//! three-step session handshake, invokes the tool, and discards the
//! session.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  McpHttpClient                                              │
//! │  - one instance per remote server (base URL + timeout)      │
//! │  - call_tool() runs the whole handshake per invocation      │
//! └─────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ToolSession (single use)                                   │
//! │  - initialize        → session id from response header      │
//! │  - notify ready      → session id echoed as request header  │
//! │  - tools/call        → event-stream body, result extracted  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use opsq_mcp::{McpHttpClient, McpServerConfig};
//! use serde_json::Map;
//!
//! let client = McpHttpClient::new(McpServerConfig::new(
//!     "loki",
//!     "http://loki-mcp.monitoring.svc.cluster.local:8000",
//! ))?;
//!
//! let mut arguments = Map::new();
//! arguments.insert("namespace".into(), "ai".into());
//! let result = client.call_tool("get_error_summary", &arguments).await?;
//! println!("{result}");
//! ```
//!
//! # Protocol
//!
//! Messages are JSON-RPC 2.0 over `POST <base>/mcp`. Responses are framed
//! as server-sent events; the payload is the JSON after the first
//! `data: ` line:
//!
//! ```text
//! event: message
//! data: {"jsonrpc": "2.0", "id": "tool-call", "result": {...}}
//! ```
//!
//! The session id travels as the `mcp-session-id` header: assigned by the
//! server on `initialize`, echoed by the client on every later message of
//! that session. Sessions are never reused across tool calls.

pub mod client;
pub mod error;
pub mod protocol;

// Re-export main types
pub use client::{McpHttpClient, McpServerConfig};
pub use error::{McpError, Result};
pub use protocol::{
    CallToolParams, ClientCapabilities, ClientInfo, InitializeParams, JsonRpcNotification,
    JsonRpcRequest, PROTOCOL_VERSION, SESSION_HEADER, extract_event_json, extract_result_text,
};
