//! CLI command handlers.

pub mod ask;
pub mod route;
pub mod serve;

use std::sync::Arc;

use anyhow::Result;

use opsq_config::OpsqConfig;
use opsq_engine::{ClientSet, Engine};
use opsq_llm::{OllamaConfig, OllamaSummarizer};
use opsq_mcp::{McpHttpClient, McpServerConfig};
use opsq_router::QuestionRouter;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Assemble the question engine from configuration.
pub fn build_engine(config: &OpsqConfig) -> Result<Engine> {
    tracing::debug!(
        loki = %config.mcp.loki.url,
        prometheus = %config.mcp.prometheus.url,
        summarizer = %config.summarizer.url,
        "assembling engine"
    );

    let loki = McpHttpClient::new(
        McpServerConfig::new("loki", config.mcp.loki.url.as_str())
            .with_timeout(config.mcp.timeout()),
    )?;
    let prometheus = McpHttpClient::new(
        McpServerConfig::new("prometheus", config.mcp.prometheus.url.as_str())
            .with_timeout(config.mcp.timeout()),
    )?;

    let summarizer = OllamaSummarizer::new(
        OllamaConfig::new(
            config.summarizer.url.as_str(),
            config.summarizer.model.as_str(),
        )
        .with_timeout(config.summarizer.timeout()),
    )?;

    Ok(Engine::new(
        QuestionRouter::new(),
        ClientSet::new(loki, prometheus),
        Arc::new(summarizer),
    ))
}
