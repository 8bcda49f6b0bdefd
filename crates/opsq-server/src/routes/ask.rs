//! Question endpoint.
//!
//! Accepts a free-text question, routes it to a diagnostic tool, and
//! returns the tool output together with a summary.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use opsq_engine::Answer;

use crate::error::ServerError;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for the ask endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    /// The user's question.
    pub question: String,
}

/// Response from the ask endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The original question.
    pub question: String,

    /// Route label, e.g. `loki.get_pod_logs`.
    pub route: String,

    /// Which tool server handled the call.
    pub server: String,

    /// Tool name on that server.
    pub tool: String,

    /// Arguments passed to the tool.
    pub tool_args: Map<String, Value>,

    /// Raw tool output.
    pub raw_result: String,

    /// Summarized tool output (falls back to the raw output).
    pub summary: String,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self {
            question: answer.question,
            route: answer.route,
            server: answer.server.to_string(),
            tool: answer.tool,
            tool_args: answer.tool_args,
            raw_result: answer.raw_result,
            summary: answer.summary,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handler
// ─────────────────────────────────────────────────────────────────────────────

/// POST /ask - Answer an operational question.
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ServerError> {
    if request.question.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "question must not be empty".to_string(),
        ));
    }

    let answer = state.engine.ask(&request.question).await?;
    Ok(Json(AskResponse::from(answer)))
}
