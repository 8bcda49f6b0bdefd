//! Prometheus metrics endpoint.

use axum::extract::State;

use crate::state::AppState;

/// GET /metrics - Prometheus text exposition.
pub async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.export()
}
