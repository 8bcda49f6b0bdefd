//! Ollama-backed summarizer.
//!
//! Talks to Ollama's native `/api/generate` endpoint with streaming
//! disabled. An empty generation is not an error: the raw result is handed
//! back instead, since the contract is "replacement text or the original".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};
use crate::summarizer::Summarizer;

/// Default bound on one generation request. Generation is slow; this is
/// deliberately looser than tool-call timeouts.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Ollama generation endpoint.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Model name to generate with.
    pub model: String,
    /// Timeout for one generation request.
    pub timeout: Duration,
}

impl OllamaConfig {
    /// Create a config with the default timeout.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the generation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new("http://localhost:11434", "phi4-mini:latest")
    }
}

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body for `/api/generate` with `stream: false`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Summarizer backed by a local Ollama model.
pub struct OllamaSummarizer {
    client: Client,
    config: OllamaConfig,
    endpoint: String,
}

impl OllamaSummarizer {
    /// Create a summarizer from a config.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| LlmError::Http(format!("failed to build HTTP client: {err}")))?;
        let endpoint = format!("{}/api/generate", config.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Endpoint this summarizer posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, question: &str, raw_result: &str) -> Result<String> {
        let prompt = build_prompt(question, raw_result);
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: &prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| LlmError::Http(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|err| LlmError::Http(err.to_string()))?;

        let summary = reply.response.trim();
        if summary.is_empty() {
            tracing::debug!(model = %self.config.model, "empty generation, keeping raw result");
            return Ok(raw_result.to_string());
        }
        Ok(summary.to_string())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Prompt contract: grounded in the provided tool result only, exactly
/// three short bullets.
fn build_prompt(question: &str, raw_result: &str) -> String {
    format!(
        "You are summarizing real Kubernetes ops tool output.\n\
         Use only the provided tool result.\n\
         Do not invent facts.\n\
         If the tool result is empty, say that clearly.\n\
         Return exactly 3 short bullet points.\n\n\
         User question:\n{question}\n\n\
         Tool result:\n{raw_result}\n"
    )
}
