//! Deterministic question routing for opsq.
//!
//! This crate maps a free-text operational question ("which pods are
//! restarting in the ai namespace?") to exactly one tool invocation on a
//! remote diagnostic server, without any model inference. Classification is
//! an ordered rule table: each rule pairs a predicate over the normalized
//! question with the arguments it forwards, and the first rule that fires
//! wins.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  QuestionRouter                                          │
//! │  - normalize text (lowercase, strip punctuation)         │
//! │  - extract fields (namespace, hours, pod name, query)    │
//! │  - evaluate rules top to bottom, first match wins        │
//! └──────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//!            ToolRequest { server, tool, arguments }
//! ```
//!
//! # Usage
//!
//! ```rust
//! use opsq_router::QuestionRouter;
//!
//! let router = QuestionRouter::new();
//! let request = router.route("Is Prometheus healthy?").unwrap();
//! assert_eq!(request.tool, "health_check");
//! ```
//!
//! Routing is pure and deterministic: the same question always produces the
//! same request for the lifetime of the process. Questions that match no
//! rule fail with [`RouteError::NoMatch`] so the caller can report a client
//! input error rather than guessing.

pub mod error;
pub mod extract;
pub mod request;
pub mod router;

// Re-export main types
pub use error::{Result, RouteError};
pub use request::{ServerId, ToolRequest};
pub use router::QuestionRouter;
