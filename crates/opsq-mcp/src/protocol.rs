//! JSON-RPC message types and framing rules for streamable HTTP MCP.
//!
//! Each HTTP exchange carries exactly one JSON-RPC message, so request ids
//! are fixed labels rather than counters. Response bodies are framed as
//! server-sent events and decoded with [`extract_event_json`]; tool-call
//! envelopes are reduced to user-facing text with [`extract_result_text`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{McpError, Result};

/// JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this client speaks.
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// Header carrying the server-assigned session id, in both directions.
pub const SESSION_HEADER: &str = "mcp-session-id";

// ─────────────────────────────────────────────────────────────────────────────
// JSON-RPC Base Types
// ─────────────────────────────────────────────────────────────────────────────

/// A JSON-RPC request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request ID for correlating responses.
    pub id: String,
    /// Method name to call.
    pub method: String,
    /// Method parameters (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request.
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC notification (no id, no response expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Method parameters (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Create a new notification.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handshake Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for the `initialize` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version the client speaks.
    pub protocol_version: String,
    /// Capabilities advertised by the client.
    pub capabilities: ClientCapabilities,
    /// Client identity.
    pub client_info: ClientInfo,
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ClientCapabilities::default(),
            client_info: ClientInfo::default(),
        }
    }
}

/// Capabilities advertised during `initialize`. This client needs none,
/// but the field is required by the handshake and serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientCapabilities {}

/// Client name and version reported during `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    pub version: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            name: "opsq".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool Invocation
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for a `tools/call` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Tool name.
    pub name: String,
    /// Arguments passed to the tool. Always serialized, `{}` when empty.
    pub arguments: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Event-Stream Framing
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the first `data: `-prefixed line of an event-stream body.
///
/// The framing is a contract with the server: every meaningful payload
/// line carries the literal `data: ` prefix, and only the first one
/// counts. Fails with [`McpError::NoEventPayload`] when no such line
/// exists.
pub fn extract_event_json(body: &str) -> Result<Value> {
    for line in body.lines() {
        if let Some(payload) = line.strip_prefix("data: ") {
            return Ok(serde_json::from_str(payload)?);
        }
    }
    Err(McpError::NoEventPayload)
}

// ─────────────────────────────────────────────────────────────────────────────
// Result Extraction
// ─────────────────────────────────────────────────────────────────────────────

/// Reduce a `tools/call` response payload to user-facing text.
///
/// Strategies in priority order: a payload marked `isError` fails the call
/// (with the nested structured message when one exists); a structured
/// `result` value wins over text content; text content items of type
/// `"text"` are joined by newlines, skipping empty entries; and the whole
/// result re-serialized as JSON is the guaranteed fallback, never empty.
pub fn extract_result_text(payload: &Value) -> Result<String> {
    let empty = Value::Object(Map::new());
    let result = payload.get("result").unwrap_or(&empty);

    if result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let message = result
            .get("structuredContent")
            .and_then(|structured| structured.get("result"))
            .map(value_to_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "MCP tool call failed".to_string());
        return Err(McpError::tool_call_failed(message));
    }

    if let Some(structured) = result
        .get("structuredContent")
        .and_then(|structured| structured.get("result"))
    {
        return Ok(value_to_text(structured));
    }

    if let Some(content) = result.get("content").and_then(Value::as_array) {
        let chunks: Vec<&str> = content
            .iter()
            .filter(|item| item.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|item| item.get("text").and_then(Value::as_str))
            .filter(|text| !text.is_empty())
            .collect();
        if !chunks.is_empty() {
            return Ok(chunks.join("\n"));
        }
    }

    Ok(result.to_string())
}

/// Stringify a JSON value for human eyes: bare strings stay unquoted,
/// everything else renders as compact JSON.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
