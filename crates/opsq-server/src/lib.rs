//! HTTP API server for opsq.
//!
//! This crate provides the network transport layer for asking cluster
//! questions over HTTP. It wraps an [`opsq_engine::Engine`] in a small
//! axum application:
//!
//! ```text
//!   POST /ask      route a question, call the tool, summarize
//!   GET  /health   liveness probe
//!   GET  /metrics  Prometheus text exposition
//! ```
//!
//! # Features
//!
//! - REST API for question/answer interactions
//! - Structured error bodies with stable `code` fields
//! - Request logging and per-route Prometheus metrics
//!
//! # Example
//!
//! ```ignore
//! use opsq_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::new()
//!     .with_bind_address("127.0.0.1:8080".parse()?);
//!
//! let server = Server::new(engine, config);
//! server.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ErrorResponse, Result, ServerError};
pub use routes::{AskRequest, AskResponse};
pub use state::AppState;
pub use telemetry::HttpMetrics;

use std::net::SocketAddr;

use axum::{Router, middleware};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use opsq_engine::Engine;

/// The opsq HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server with the given engine and configuration.
    pub fn new(engine: Engine, config: ServerConfig) -> Self {
        Self {
            state: AppState::new(engine, config),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        use axum::routing::{get, post};

        Router::new()
            .route("/ask", post(routes::ask_handler))
            .merge(routes::health_routes())
            .route("/metrics", get(routes::metrics_handler))
            // Request logging (inner layer, runs first)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                telemetry::request_logging_middleware,
            ))
            // Metrics (outer layer, observes the final status code)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                telemetry::track_metrics_middleware,
            ))
            // TraceLayer for detailed HTTP tracing
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        self.run_on(addr).await
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let router = self.router();

        info!("Starting server on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}
