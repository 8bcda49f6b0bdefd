//! Ordered routing rules.
//!
//! Rules are evaluated top to bottom and the first match is terminal. The
//! order is itself the priority policy: unambiguous phrasing ("namespaces")
//! and specific entity references (a pod name) outrank vague symptom
//! keywords ("error"), which sit last as the catch-all before failure.

use serde_json::{Map, Value};

use crate::error::{Result, RouteError};
use crate::extract::Extractors;
use crate::request::{ServerId, ToolRequest};

/// Rules in evaluation order.
const RULES: [Rule; 6] = [
    Rule::PrometheusHealth,
    Rule::ListNamespaces,
    Rule::PodRestarts,
    Rule::PodLogs,
    Rule::SearchLogs,
    Rule::ErrorSummary,
];

/// One deterministic route: a predicate over the question paired with the
/// arguments it forwards.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Prometheus self-health questions.
    PrometheusHealth,
    /// Listing which namespaces ship logs.
    ListNamespaces,
    /// Restart and crash-loop detection.
    PodRestarts,
    /// Logs for one named pod.
    PodLogs,
    /// Free-text log search.
    SearchLogs,
    /// Error-keyword summary over a namespace.
    ErrorSummary,
}

/// Fields extracted once per question and threaded into whichever rule
/// fires.
struct RouteContext {
    normalized: String,
    namespace: String,
    hours: u64,
    pod_name: String,
    search_query: String,
}

impl RouteContext {
    /// Arguments shared by every namespace-scoped tool. An empty namespace
    /// means "all namespaces" and is sent as-is, never omitted.
    fn common_args(&self) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert(
            "namespace".to_string(),
            Value::String(self.namespace.clone()),
        );
        args.insert("hours".to_string(), Value::Number(self.hours.into()));
        args
    }
}

impl Rule {
    fn apply(&self, ctx: &RouteContext) -> Option<ToolRequest> {
        match self {
            Rule::PrometheusHealth => (mentions(&ctx.normalized, &["prometheus", "metrics"])
                && mentions(&ctx.normalized, &["health", "healthy", "up"]))
            .then(|| ToolRequest::new(ServerId::Prometheus, "health_check", Map::new())),

            Rule::ListNamespaces => ctx
                .normalized
                .contains("namespaces")
                .then(|| ToolRequest::new(ServerId::Loki, "list_namespaces", Map::new())),

            Rule::PodRestarts => mentions(
                &ctx.normalized,
                &["restart", "restarts", "crash", "crashing", "crashloop", "oomkilled"],
            )
            .then(|| ToolRequest::new(ServerId::Loki, "find_pod_restarts", ctx.common_args())),

            Rule::PodLogs => (!ctx.pod_name.is_empty()).then(|| {
                let mut args = ctx.common_args();
                args.insert("pod_name".to_string(), Value::String(ctx.pod_name.clone()));
                ToolRequest::new(ServerId::Loki, "get_pod_logs", args)
            }),

            Rule::SearchLogs => (!ctx.search_query.is_empty()).then(|| {
                let mut args = ctx.common_args();
                args.insert("query".to_string(), Value::String(ctx.search_query.clone()));
                ToolRequest::new(ServerId::Loki, "search_logs", args)
            }),

            Rule::ErrorSummary => mentions(
                &ctx.normalized,
                &["error", "errors", "exception", "exceptions", "panic", "fatal"],
            )
            .then(|| ToolRequest::new(ServerId::Loki, "get_error_summary", ctx.common_args())),
        }
    }
}

/// Substring containment, matching anywhere in the text.
fn mentions(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

/// Deterministic question-to-tool router.
///
/// Construction compiles the extraction patterns once; [`route`] is then
/// pure string work with no I/O, so a single router can be shared freely
/// across concurrent requests.
///
/// [`route`]: QuestionRouter::route
#[derive(Debug)]
pub struct QuestionRouter {
    extract: Extractors,
}

impl QuestionRouter {
    /// Build a router with the standard rule table.
    pub fn new() -> Self {
        QuestionRouter {
            extract: Extractors::new(),
        }
    }

    /// Map a question to the one tool invocation that answers it.
    ///
    /// Fails with [`RouteError::NoMatch`] when no rule fires; no tool call
    /// is attempted in that case.
    pub fn route(&self, question: &str) -> Result<ToolRequest> {
        let ctx = self.context(question);
        for rule in &RULES {
            if let Some(request) = rule.apply(&ctx) {
                tracing::debug!(route = %request.route_label(), "question routed");
                return Ok(request);
            }
        }
        Err(RouteError::no_match(question))
    }

    fn context(&self, question: &str) -> RouteContext {
        let normalized = self.extract.normalize(question);
        RouteContext {
            namespace: self.extract.namespace(&normalized),
            hours: self.extract.hours(&normalized),
            pod_name: self.extract.pod_name(&normalized),
            search_query: self.extract.search_query(question),
            normalized,
        }
    }
}

impl Default for QuestionRouter {
    fn default() -> Self {
        Self::new()
    }
}
