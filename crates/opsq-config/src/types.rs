//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [server]            # HTTP front door
//! [mcp]               # shared tool-call settings
//! [mcp.loki]          # log store endpoint
//! [mcp.prometheus]    # metrics store endpoint
//! [summarizer]        # Ollama endpoint and model
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default Loki MCP endpoint (in-cluster service DNS).
pub const DEFAULT_LOKI_URL: &str = "http://loki-mcp.monitoring.svc.cluster.local:8000";

/// Default Prometheus MCP endpoint (in-cluster service DNS).
pub const DEFAULT_PROMETHEUS_URL: &str = "http://prometheus-mcp.monitoring.svc.cluster.local:8080";

/// Default Ollama endpoint (in-cluster service DNS).
pub const DEFAULT_OLLAMA_URL: &str = "http://ollama-external.ai.svc.cluster.local:11434";

/// Default Ollama model.
pub const DEFAULT_OLLAMA_MODEL: &str = "phi4-mini:latest";

/// Default tool-call timeout in seconds.
pub const DEFAULT_MCP_TIMEOUT_SECS: u64 = 30;

/// Default generation timeout in seconds.
pub const DEFAULT_SUMMARIZER_TIMEOUT_SECS: u64 = 60;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// Every field has a default, so an absent file, an empty file, and a
/// partial file are all valid configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsqConfig {
    /// HTTP front door.
    pub server: ServerSection,
    /// Remote MCP tool servers.
    pub mcp: McpSection,
    /// Summarizer backend.
    pub summarizer: SummarizerSection,
}

impl OpsqConfig {
    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply process-environment overrides.
    ///
    /// `LOKI_MCP_URL`, `PROMETHEUS_MCP_URL`, `OLLAMA_URL` and
    /// `OLLAMA_MODEL` match the variable names the container deployment
    /// sets; `OPSQ_BIND` overrides the listen address.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key-value source. Split out from
    /// [`apply_env`](OpsqConfig::apply_env) so tests can drive it without
    /// touching the process environment.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = get("OPSQ_BIND") {
            self.server.bind = bind;
        }
        if let Some(url) = get("LOKI_MCP_URL") {
            self.mcp.loki.url = url;
        }
        if let Some(url) = get("PROMETHEUS_MCP_URL") {
            self.mcp.prometheus.url = url;
        }
        if let Some(url) = get("OLLAMA_URL") {
            self.summarizer.url = url;
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            self.summarizer.model = model;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address for the HTTP front door.
    pub bind: String,
}

impl ServerSection {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|source| ConfigError::InvalidBind {
            value: self.bind.clone(),
            source,
        })
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// `[mcp]` section: shared tool-call settings plus per-server endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McpSection {
    /// Per-request timeout for tool calls, in seconds.
    pub timeout_secs: u64,
    /// Loki log store endpoint.
    pub loki: McpServerSection,
    /// Prometheus metrics store endpoint.
    pub prometheus: McpServerSection,
}

impl McpSection {
    /// Tool-call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for McpSection {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_MCP_TIMEOUT_SECS,
            loki: McpServerSection {
                url: DEFAULT_LOKI_URL.to_string(),
            },
            prometheus: McpServerSection {
                url: DEFAULT_PROMETHEUS_URL.to_string(),
            },
        }
    }
}

/// One remote MCP server endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerSection {
    /// Base URL of the server; the client appends `/mcp`.
    pub url: String,
}

/// `[summarizer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSection {
    /// Base URL of the Ollama server.
    pub url: String,
    /// Model to generate with.
    pub model: String,
    /// Generation timeout, in seconds.
    pub timeout_secs: u64,
}

impl SummarizerSection {
    /// Generation timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SummarizerSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: DEFAULT_SUMMARIZER_TIMEOUT_SECS,
        }
    }
}
