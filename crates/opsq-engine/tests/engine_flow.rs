//! Engine orchestration against an in-process mock MCP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};

use opsq_engine::{ClientSet, Engine, EngineError};
use opsq_llm::MockSummarizer;
use opsq_mcp::{McpHttpClient, McpServerConfig};
use opsq_router::QuestionRouter;

#[derive(Clone)]
struct MockState {
    /// Answer tools/call with HTTP 500 instead of a result.
    fail_invoke: bool,
    /// Number of tools/call messages seen.
    invocations: Arc<AtomicUsize>,
}

async fn mcp_endpoint(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(message): Json<Value>,
) -> Response {
    let method = message
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();
    match method {
        "initialize" => {
            let body = format!(
                "event: message\ndata: {}\n\n",
                json!({"jsonrpc": "2.0", "id": "initialize", "result": {}})
            );
            (StatusCode::OK, [("mcp-session-id", "engine-test")], body).into_response()
        }
        "notifications/initialized" => StatusCode::ACCEPTED.into_response(),
        "tools/call" => {
            state.invocations.fetch_add(1, Ordering::SeqCst);
            if headers.get("mcp-session-id").is_none() {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            if state.fail_invoke {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            let tool = message["params"]["name"].as_str().unwrap_or_default();
            let body = format!(
                "event: message\ndata: {}\n\n",
                json!({
                    "jsonrpc": "2.0",
                    "id": "tool-call",
                    "result": {"structuredContent": {"result": format!("{tool} output")}}
                })
            );
            (StatusCode::OK, body).into_response()
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn_server(fail_invoke: bool) -> (SocketAddr, Arc<AtomicUsize>) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        fail_invoke,
        invocations: invocations.clone(),
    };
    let app = Router::new()
        .route("/mcp", post(mcp_endpoint))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    (addr, invocations)
}

fn engine_for(addr: SocketAddr, summarizer: Arc<MockSummarizer>) -> Engine {
    let loki = McpHttpClient::new(McpServerConfig::new("loki", format!("http://{addr}")))
        .expect("loki client");
    let prometheus =
        McpHttpClient::new(McpServerConfig::new("prometheus", format!("http://{addr}")))
            .expect("prometheus client");
    Engine::new(
        QuestionRouter::new(),
        ClientSet::new(loki, prometheus),
        summarizer,
    )
}

#[tokio::test]
async fn ask_routes_invokes_and_summarizes() {
    let (addr, _) = spawn_server(false).await;
    let summarizer = Arc::new(MockSummarizer::with_text("- three pods restarted"));
    let engine = engine_for(addr, summarizer.clone());

    let answer = engine
        .ask("Which pods are restarting in the ai namespace in the last 2 hours?")
        .await
        .unwrap();

    assert_eq!(answer.route, "loki.find_pod_restarts");
    assert_eq!(answer.tool, "find_pod_restarts");
    assert_eq!(answer.raw_result, "find_pod_restarts output");
    assert_eq!(answer.summary, "- three pods restarted");
    assert_eq!(answer.tool_args["namespace"], json!("ai"));
    assert_eq!(answer.tool_args["hours"], json!(2));

    // The summarizer saw the original question and the raw result.
    let calls = summarizer.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("restarting"));
    assert_eq!(calls[0].1, "find_pod_restarts output");
}

#[tokio::test]
async fn summarizer_failure_falls_back_to_raw_result() {
    let (addr, _) = spawn_server(false).await;
    let summarizer = Arc::new(MockSummarizer::failing());
    let engine = engine_for(addr, summarizer.clone());

    let answer = engine.ask("Is Prometheus healthy?").await.unwrap();

    assert_eq!(answer.route, "prometheus.health_check");
    assert_eq!(answer.summary, answer.raw_result);
    assert_eq!(summarizer.call_count(), 1);
}

#[tokio::test]
async fn unroutable_question_attempts_no_tool_call() {
    let (addr, invocations) = spawn_server(false).await;
    let summarizer = Arc::new(MockSummarizer::with_text("unused"));
    let engine = engine_for(addr, summarizer.clone());

    let err = engine.ask("What is the meaning of life?").await.unwrap_err();

    assert!(matches!(err, EngineError::BadQuestion(_)));
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn upstream_failure_skips_summarization() {
    let (addr, invocations) = spawn_server(true).await;
    let summarizer = Arc::new(MockSummarizer::with_text("unused"));
    let engine = engine_for(addr, summarizer.clone());

    let err = engine.ask("any errors in the ai namespace").await.unwrap_err();

    assert!(matches!(err, EngineError::Upstream(_)));
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert_eq!(summarizer.call_count(), 0);
}
