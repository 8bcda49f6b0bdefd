//! The answer pipeline: route, invoke, summarize.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use opsq_llm::SharedSummarizer;
use opsq_mcp::McpHttpClient;
use opsq_router::{QuestionRouter, ServerId};

use crate::error::Result;

/// The protocol clients for every known server.
///
/// The set is closed by construction: [`ServerId`] is a two-variant enum,
/// and this struct holds exactly one client per variant, so a routed
/// request can never name a server without a client.
#[derive(Debug, Clone)]
pub struct ClientSet {
    loki: McpHttpClient,
    prometheus: McpHttpClient,
}

impl ClientSet {
    /// Build the set from one client per server.
    pub fn new(loki: McpHttpClient, prometheus: McpHttpClient) -> Self {
        Self { loki, prometheus }
    }

    /// Client for a server id.
    pub fn get(&self, server: ServerId) -> &McpHttpClient {
        match server {
            ServerId::Loki => &self.loki,
            ServerId::Prometheus => &self.prometheus,
        }
    }

    /// Invoke a tool on a server and return its text result.
    pub async fn invoke(
        &self,
        server: ServerId,
        tool: &str,
        arguments: &Map<String, Value>,
    ) -> opsq_mcp::Result<String> {
        self.get(server).call_tool(tool, arguments).await
    }
}

/// Everything produced for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The question as received.
    pub question: String,
    /// `server.tool` label of the matched route.
    pub route: String,
    /// Which server handled the call.
    pub server: ServerId,
    /// Tool that was invoked.
    pub tool: String,
    /// Arguments the tool was invoked with.
    pub tool_args: Map<String, Value>,
    /// Raw text result from the tool.
    pub raw_result: String,
    /// Summarized result, or the raw result when summarization failed.
    pub summary: String,
}

/// Orchestrates one question end to end.
///
/// Holds only immutable collaborators (rule table, client configs, a
/// shared summarizer), so one engine serves any number of concurrent
/// questions without cross-talk.
pub struct Engine {
    router: QuestionRouter,
    clients: ClientSet,
    summarizer: SharedSummarizer,
}

impl Engine {
    /// Build an engine from its three collaborators.
    pub fn new(router: QuestionRouter, clients: ClientSet, summarizer: SharedSummarizer) -> Self {
        Self {
            router,
            clients,
            summarizer,
        }
    }

    /// Answer one question: route it, invoke the tool, summarize.
    ///
    /// Routing failures and tool failures surface as the two
    /// [`EngineError`](crate::EngineError) categories. A summarizer
    /// failure does not fail the question — the raw result is returned as
    /// the summary instead.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let request = self.router.route(question)?;
        let route = request.route_label();
        tracing::info!(%route, "question routed");

        let raw_result = self
            .clients
            .invoke(request.server, &request.tool, &request.arguments)
            .await?;

        let summary = match self.summarizer.summarize(question, &raw_result).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(
                    summarizer = self.summarizer.name(),
                    error = %err,
                    "summarization failed, returning raw result"
                );
                raw_result.clone()
            }
        };

        Ok(Answer {
            question: question.to_string(),
            route,
            server: request.server,
            tool: request.tool,
            tool_args: request.arguments,
            raw_result,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_serializes_server_lowercase() {
        let answer = Answer {
            question: "Is Prometheus healthy?".to_string(),
            route: "prometheus.health_check".to_string(),
            server: ServerId::Prometheus,
            tool: "health_check".to_string(),
            tool_args: Map::new(),
            raw_result: "All targets up".to_string(),
            summary: "- everything healthy".to_string(),
        };

        let encoded = serde_json::to_value(&answer).unwrap();
        assert_eq!(encoded["server"], json!("prometheus"));
        assert_eq!(encoded["route"], json!("prometheus.health_check"));
        assert_eq!(encoded["tool_args"], json!({}));
    }
}
