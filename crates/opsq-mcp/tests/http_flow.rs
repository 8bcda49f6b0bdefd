//! Full protocol flow against an in-process mock MCP server.
//!
//! The mock speaks just enough streamable HTTP MCP to exercise the client:
//! it assigns a session id on `initialize`, insists on seeing it echoed on
//! later messages, and frames every response body as a server-sent event.

use std::net::SocketAddr;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Map, Value, json};

use opsq_mcp::{McpError, McpHttpClient, McpServerConfig};

const SESSION_ID: &str = "session-e2e-1";

/// Which failure (if any) the mock server injects.
#[derive(Debug, Clone, Copy)]
enum ServerMode {
    /// Healthy server returning a structured result.
    Structured,
    /// Healthy server returning text content items.
    TextContent,
    /// Tool answers with `isError` and a nested message.
    ToolError,
    /// Initialize response missing the session header.
    NoSessionHeader,
    /// Tool response body without any `data: ` line.
    NoDataLine,
    /// Tool call answered with HTTP 500.
    FailInvoke,
    /// Ready notification rejected with HTTP 400.
    RejectNotify,
    /// Structured result carrying the session id the server received.
    EchoSession,
    /// Structured result carrying the arguments the server received.
    EchoArgs,
}

fn event_body(payload: Value) -> String {
    format!("event: message\ndata: {payload}\n\n")
}

fn ok_event(result: Value) -> Response {
    let payload = json!({"jsonrpc": "2.0", "id": "tool-call", "result": result});
    (StatusCode::OK, event_body(payload)).into_response()
}

async fn mcp_endpoint(
    State(mode): State<ServerMode>,
    headers: HeaderMap,
    Json(message): Json<Value>,
) -> Response {
    let method = message
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let session = headers
        .get("mcp-session-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match method {
        "initialize" => {
            let body = event_body(json!({
                "jsonrpc": "2.0",
                "id": "initialize",
                "result": {"protocolVersion": "2025-06-18"}
            }));
            match mode {
                ServerMode::NoSessionHeader => (StatusCode::OK, body).into_response(),
                _ => (StatusCode::OK, [("mcp-session-id", SESSION_ID)], body).into_response(),
            }
        }
        "notifications/initialized" => {
            if session.is_empty() {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            match mode {
                ServerMode::RejectNotify => StatusCode::BAD_REQUEST.into_response(),
                _ => StatusCode::ACCEPTED.into_response(),
            }
        }
        "tools/call" => {
            if session.is_empty() {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            match mode {
                ServerMode::FailInvoke => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                ServerMode::NoDataLine => {
                    (StatusCode::OK, "event: message\n\n".to_string()).into_response()
                }
                ServerMode::ToolError => ok_event(json!({
                    "isError": true,
                    "structuredContent": {"result": "loki exploded"}
                })),
                ServerMode::Structured => ok_event(json!({
                    "structuredContent": {"result": "42 pods running"},
                    "content": [{"type": "text", "text": "shadowed by structured result"}]
                })),
                ServerMode::TextContent => ok_event(json!({
                    "content": [
                        {"type": "text", "text": "line one"},
                        {"type": "text", "text": ""},
                        {"type": "text", "text": "line two"}
                    ]
                })),
                ServerMode::EchoSession => ok_event(json!({
                    "structuredContent": {"result": session}
                })),
                ServerMode::EchoArgs => {
                    let arguments = message["params"]["arguments"].to_string();
                    ok_event(json!({"structuredContent": {"result": arguments}}))
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn_server(mode: ServerMode) -> SocketAddr {
    let app = Router::new()
        .route("/mcp", post(mcp_endpoint))
        .with_state(mode);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    addr
}

fn client_for(addr: SocketAddr) -> McpHttpClient {
    McpHttpClient::new(McpServerConfig::new("mock", format!("http://{addr}")))
        .expect("client config")
}

#[tokio::test]
async fn structured_result_round_trip() {
    let addr = spawn_server(ServerMode::Structured).await;
    let result = client_for(addr)
        .call_tool("list_pods", &Map::new())
        .await
        .unwrap();
    assert_eq!(result, "42 pods running");
}

#[tokio::test]
async fn text_content_round_trip() {
    let addr = spawn_server(ServerMode::TextContent).await;
    let result = client_for(addr)
        .call_tool("get_pod_logs", &Map::new())
        .await
        .unwrap();
    assert_eq!(result, "line one\nline two");
}

#[tokio::test]
async fn session_id_is_echoed_on_tool_calls() {
    let addr = spawn_server(ServerMode::EchoSession).await;
    let result = client_for(addr)
        .call_tool("whoami", &Map::new())
        .await
        .unwrap();
    assert_eq!(result, SESSION_ID);
}

#[tokio::test]
async fn arguments_reach_the_tool_verbatim() {
    let addr = spawn_server(ServerMode::EchoArgs).await;
    let mut arguments = Map::new();
    arguments.insert("namespace".to_string(), json!("ai"));
    arguments.insert("hours".to_string(), json!(2));
    let result = client_for(addr)
        .call_tool("find_pod_restarts", &arguments)
        .await
        .unwrap();
    assert_eq!(result, r#"{"hours":2,"namespace":"ai"}"#);
}

#[tokio::test]
async fn tool_error_surfaces_nested_message() {
    let addr = spawn_server(ServerMode::ToolError).await;
    let err = client_for(addr)
        .call_tool("search_logs", &Map::new())
        .await
        .unwrap_err();
    match err {
        McpError::ToolCallFailed(message) => assert!(message.contains("loki exploded")),
        other => panic!("expected ToolCallFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_session_header_fails_the_call() {
    let addr = spawn_server(ServerMode::NoSessionHeader).await;
    let err = client_for(addr)
        .call_tool("list_pods", &Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::SessionMissing { .. }));
}

#[tokio::test]
async fn missing_data_line_fails_the_call() {
    let addr = spawn_server(ServerMode::NoDataLine).await;
    let err = client_for(addr)
        .call_tool("list_pods", &Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::NoEventPayload));
}

#[tokio::test]
async fn http_failure_during_invoke_fails_the_call() {
    let addr = spawn_server(ServerMode::FailInvoke).await;
    let err = client_for(addr)
        .call_tool("list_pods", &Map::new())
        .await
        .unwrap_err();
    match err {
        McpError::ToolCallFailed(message) => assert!(message.contains("500")),
        other => panic!("expected ToolCallFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_notification_fails_the_call() {
    let addr = spawn_server(ServerMode::RejectNotify).await;
    let err = client_for(addr)
        .call_tool("list_pods", &Map::new())
        .await
        .unwrap_err();
    match err {
        McpError::ToolCallFailed(message) => {
            assert!(message.contains("ready notification"));
        }
        other => panic!("expected ToolCallFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_fails_the_call() {
    // Nothing listens on this port; bind-then-drop guarantees it was free.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr)
        .call_tool("list_pods", &Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::ToolCallFailed(_)));
}
