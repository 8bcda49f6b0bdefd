//! Application state shared across handlers.

use std::sync::Arc;

use opsq_engine::Engine;

use crate::config::ServerConfig;
use crate::telemetry::HttpMetrics;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The question-answering engine.
    pub engine: Arc<Engine>,

    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// HTTP request metrics.
    pub metrics: HttpMetrics,
}

impl AppState {
    /// Create a new application state.
    pub fn new(engine: Engine, config: ServerConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
            metrics: HttpMetrics::new(),
        }
    }
}
