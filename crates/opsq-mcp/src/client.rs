//! HTTP client for MCP tool servers.
//!
//! One [`McpHttpClient`] per remote server. Clients hold no connection
//! state: every call opens a fresh transport, runs the full handshake, and
//! tears everything down when the call returns. Concurrent calls therefore
//! never share sessions.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{McpError, Result};
use crate::protocol::{
    CallToolParams, InitializeParams, JsonRpcNotification, JsonRpcRequest, SESSION_HEADER,
    extract_event_json, extract_result_text,
};

/// Accept header sent on every protocol message.
const ACCEPT_STREAMABLE: &str = "application/json, text/event-stream";

/// Default bound on each network step of a call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one remote tool server.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Server name, used in errors and logs.
    pub name: String,
    /// Base URL; the protocol endpoint is `<base>/mcp`.
    pub base_url: String,
    /// Timeout applied to every request of a call.
    pub timeout: Duration,
}

impl McpServerConfig {
    /// Create a config with the default timeout.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for a single remote tool server.
#[derive(Debug, Clone)]
pub struct McpHttpClient {
    name: String,
    endpoint: String,
    timeout: Duration,
}

impl McpHttpClient {
    /// Create a client, validating the configured base URL up front.
    pub fn new(config: McpServerConfig) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|source| McpError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let endpoint = format!("{}/mcp", config.base_url.trim_end_matches('/'));
        Ok(Self {
            name: config.name,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// Server name from the configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Protocol endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call a tool and return its extracted text result.
    ///
    /// Opens a dedicated transport and session for this one call. Single
    /// attempt: the first failing step aborts the whole call with a
    /// [`McpError`], and no retry is ever made.
    pub async fn call_tool(&self, tool: &str, arguments: &Map<String, Value>) -> Result<String> {
        tracing::debug!(server = %self.name, tool, "calling remote tool");
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| McpError::tool_call_failed(format!("failed to build HTTP client: {err}")))?;

        let session = ToolSession::open(&http, &self.name, &self.endpoint).await?;
        let result = session.invoke(tool, arguments).await?;
        tracing::debug!(server = %self.name, tool, bytes = result.len(), "tool call completed");
        Ok(result)
    }
}

/// An open protocol session, scoped to exactly one invocation.
///
/// A value of this type exists only after `initialize` succeeded and the
/// ready notification was acknowledged; `invoke` consumes it. Reusing a
/// session or invoking before the handshake therefore cannot compile.
struct ToolSession<'a> {
    http: &'a Client,
    server: &'a str,
    endpoint: &'a str,
    session_id: String,
}

impl<'a> ToolSession<'a> {
    /// Run the `initialize` and `notifications/initialized` steps.
    async fn open(http: &'a Client, server: &'a str, endpoint: &'a str) -> Result<ToolSession<'a>> {
        let request = JsonRpcRequest::new(
            "initialize",
            "initialize",
            Some(serde_json::to_value(InitializeParams::default())?),
        );
        let response = post_message(http, endpoint, None, &request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(McpError::tool_call_failed(format!(
                "{server} returned {status} during initialize"
            )));
        }

        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| McpError::session_missing(server))?;

        // The body must decode as a framed event, but its payload carries
        // nothing this client needs.
        let body = response.text().await?;
        extract_event_json(&body)?;

        let session = ToolSession {
            http,
            server,
            endpoint,
            session_id,
        };
        session.notify_ready().await?;
        tracing::debug!(server, "session opened");
        Ok(session)
    }

    /// Fire the ready notification. Servers answer 200 or 202; anything
    /// else fails the call.
    async fn notify_ready(&self) -> Result<()> {
        let notification =
            JsonRpcNotification::new("notifications/initialized", Some(Value::Object(Map::new())));
        let response = post_message(
            self.http,
            self.endpoint,
            Some(&self.session_id),
            &notification,
        )
        .await?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::ACCEPTED {
            return Err(McpError::tool_call_failed(format!(
                "{} rejected the ready notification with {status}",
                self.server
            )));
        }
        Ok(())
    }

    /// Send the `tools/call` request and extract its text result.
    async fn invoke(self, tool: &str, arguments: &Map<String, Value>) -> Result<String> {
        let params = CallToolParams {
            name: tool.to_string(),
            arguments: arguments.clone(),
        };
        let request = JsonRpcRequest::new(
            "tool-call",
            "tools/call",
            Some(serde_json::to_value(&params)?),
        );
        let response = post_message(
            self.http,
            self.endpoint,
            Some(&self.session_id),
            &request,
        )
        .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(McpError::tool_call_failed(format!(
                "{} returned {status} for tools/call",
                self.server
            )));
        }

        let body = response.text().await?;
        let payload = extract_event_json(&body)?;
        extract_result_text(&payload)
    }
}

/// POST one protocol message, attaching the session header once a session
/// is open.
async fn post_message<T: Serialize>(
    http: &Client,
    endpoint: &str,
    session_id: Option<&str>,
    message: &T,
) -> Result<Response> {
    let mut request = http
        .post(endpoint)
        .header(ACCEPT, ACCEPT_STREAMABLE)
        .json(message);
    if let Some(id) = session_id {
        request = request.header(SESSION_HEADER, id);
    }
    Ok(request.send().await?)
}
