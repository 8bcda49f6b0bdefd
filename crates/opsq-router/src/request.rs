//! Routed tool request types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a remote diagnostic server.
///
/// The set is closed: routing can only ever target one of these backends,
/// and the orchestrator holds exactly one protocol client per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerId {
    /// Loki log store.
    Loki,
    /// Prometheus metrics store.
    Prometheus,
}

impl ServerId {
    /// Lowercase name used in route labels and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerId::Loki => "loki",
            ServerId::Prometheus => "prometheus",
        }
    }
}

impl std::fmt::Display for ServerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully routed tool invocation.
///
/// Produced by exactly one matched rule; immutable once constructed. The
/// argument map is passed through to the remote tool verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Which remote server handles the call.
    pub server: ServerId,
    /// Tool name on that server.
    pub tool: String,
    /// Arguments forwarded to the tool.
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    /// Create a request for a tool with the given arguments.
    pub fn new(server: ServerId, tool: impl Into<String>, arguments: Map<String, Value>) -> Self {
        ToolRequest {
            server,
            tool: tool.into(),
            arguments,
        }
    }

    /// `server.tool` label used in responses and logs.
    pub fn route_label(&self) -> String {
        format!("{}.{}", self.server, self.tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_id_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ServerId::Loki).unwrap(), "\"loki\"");
        assert_eq!(
            serde_json::to_string(&ServerId::Prometheus).unwrap(),
            "\"prometheus\""
        );
    }

    #[test]
    fn route_label_joins_server_and_tool() {
        let request = ToolRequest::new(ServerId::Loki, "search_logs", Map::new());
        assert_eq!(request.route_label(), "loki.search_logs");
    }

    #[test]
    fn request_round_trips_through_json() {
        let mut arguments = Map::new();
        arguments.insert("namespace".to_string(), json!("ai"));
        arguments.insert("hours".to_string(), json!(2));
        let request = ToolRequest::new(ServerId::Prometheus, "health_check", arguments);

        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: ToolRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }
}
