//! Summarizer trait and mock implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{LlmError, Result};

/// Best-effort post-processing of raw tool output into a short summary.
///
/// Contract: implementations receive the user's question and the raw tool
/// result, and return replacement text. They may fail for any reason;
/// callers must treat failure as "no summary" and keep the raw result,
/// never as an error worth surfacing.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `raw_result` as an answer to `question`.
    async fn summarize(&self, question: &str, raw_result: &str) -> Result<String>;

    /// Implementation name, used in logs.
    fn name(&self) -> &str;
}

/// A summarizer that can be shared across threads.
pub type SharedSummarizer = Arc<dyn Summarizer>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Scripted summarizer for tests.
///
/// Replies are returned in order; once drained, further calls fail. Every
/// call is logged and can be inspected afterwards.
pub struct MockSummarizer {
    name: String,
    replies: std::sync::Mutex<Vec<String>>,
    call_log: std::sync::Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl MockSummarizer {
    /// Create a mock with the given queued replies.
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            replies: std::sync::Mutex::new(replies),
            call_log: std::sync::Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Create a mock with a single canned reply.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![text.into()])
    }

    /// Create a mock whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// All (question, raw_result) pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, question: &str, raw_result: &str) -> Result<String> {
        self.call_log
            .lock()
            .unwrap()
            .push((question.to_string(), raw_result.to_string()));

        if self.fail {
            return Err(LlmError::Backend(
                "MockSummarizer: scripted failure".to_string(),
            ));
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(LlmError::Backend(
                "MockSummarizer: no more replies available".to_string(),
            ));
        }
        Ok(replies.remove(0))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
