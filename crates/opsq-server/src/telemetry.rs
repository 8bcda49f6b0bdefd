//! Request logging and Prometheus metrics middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder,
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry,
};

use crate::state::AppState;

/// HTTP request metrics backed by a dedicated Prometheus registry.
#[derive(Clone)]
pub struct HttpMetrics {
    /// Requests by method, route, and status code.
    pub requests_total: IntCounterVec,

    /// Request latency by route.
    pub request_duration_seconds: HistogramVec,

    registry: Arc<Registry>,
}

impl HttpMetrics {
    /// Create a fresh registry with all metrics registered.
    pub fn new() -> Self {
        let registry = Registry::new();

        let requests_total = register_int_counter_vec_with_registry!(
            "opsq_http_requests_total",
            "Total number of HTTP requests by method, path, and status",
            &["method", "path", "status"],
            registry
        )
        .expect("metric can be registered");

        let request_duration_seconds = register_histogram_vec_with_registry!(
            "opsq_http_request_duration_seconds",
            "HTTP request latency in seconds by path",
            &["path"],
            registry
        )
        .expect("metric can be registered");

        Self {
            requests_total,
            request_duration_seconds,
            registry: Arc::new(registry),
        }
    }

    /// Render all registered metrics in Prometheus text exposition format.
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .expect("metrics encode to text");
        String::from_utf8(buffer).expect("exposition text is UTF-8")
    }
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware: record request count and latency per route.
///
/// Uses the matched route template (e.g. `/ask`) rather than the raw URI
/// so that label cardinality stays bounded.
pub async fn track_metrics_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    state
        .metrics
        .requests_total
        .with_label_values(&[method.as_str(), path.as_str(), status.as_str()])
        .inc();
    state
        .metrics
        .request_duration_seconds
        .with_label_values(&[path.as_str()])
        .observe(elapsed);

    response
}

/// Middleware: log each request with method, path, status, and duration.
pub async fn request_logging_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip if request logging is disabled
    if !state.config.request_logging {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    // Log based on status code
    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed with client error"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_includes_registered_metrics() {
        let metrics = HttpMetrics::new();
        metrics
            .requests_total
            .with_label_values(&["GET", "/health", "200"])
            .inc();
        metrics
            .request_duration_seconds
            .with_label_values(&["/health"])
            .observe(0.01);

        let text = metrics.export();
        assert!(text.contains("opsq_http_requests_total"));
        assert!(text.contains("opsq_http_request_duration_seconds"));
        assert!(text.contains("path=\"/health\""));
    }

    #[test]
    fn counters_accumulate() {
        let metrics = HttpMetrics::new();
        let counter = metrics
            .requests_total
            .with_label_values(&["POST", "/ask", "200"]);
        counter.inc();
        counter.inc();
        assert_eq!(counter.get(), 2);
    }
}
