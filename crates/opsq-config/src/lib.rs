//! Configuration for opsq.
//!
//! Everything ships with defaults matching the in-cluster deployment, so
//! the binary runs with no config file at all. A project-local `opsq.toml`
//! (or an explicitly given path) overrides the defaults, and a handful of
//! environment variables override both — the same variables the container
//! deployment sets.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [mcp]
//! timeout_secs = 30
//!
//! [mcp.loki]
//! url = "http://loki-mcp.monitoring.svc.cluster.local:8000"
//!
//! [mcp.prometheus]
//! url = "http://prometheus-mcp.monitoring.svc.cluster.local:8080"
//!
//! [summarizer]
//! url = "http://ollama-external.ai.svc.cluster.local:11434"
//! model = "phi4-mini:latest"
//! timeout_secs = 60
//! ```

pub mod discovery;
pub mod error;
pub mod types;

// Re-export main types
pub use discovery::{PROJECT_CONFIG_FILE, load_config, load_config_file};
pub use error::{ConfigError, Result};
pub use types::{
    DEFAULT_BIND, DEFAULT_LOKI_URL, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL,
    DEFAULT_PROMETHEUS_URL, McpSection, McpServerSection, OpsqConfig, ServerSection,
    SummarizerSection,
};
