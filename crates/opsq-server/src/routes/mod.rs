//! API routes.

pub mod ask;
pub mod health;
pub mod metrics;

pub use ask::{AskRequest, AskResponse, ask_handler};
pub use health::{HealthResponse, health_routes};
pub use metrics::metrics_handler;
