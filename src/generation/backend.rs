//! Core generation backend trait.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// Reasons a generation call can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// Result type for generation calls.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// One prompt sent to a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System instruction framing the assistant.
    pub system: String,
    /// User-role prompt.
    pub prompt: String,
    /// Output length limit in tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Opaque text-generation capability: given a prompt, return text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Generate a completion for a request.
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> bool {
        true
    }
}

/// A backend with a fixed outcome, for tests and offline runs.
///
/// Records every request it receives.
pub struct ScriptedBackend {
    outcome: GenerationResult<String>,
    delay: Option<std::time::Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// Always fail with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: GenerationResult<String>) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to exercise timeouts.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of generate calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }

    async fn health_check(&self) -> bool {
        self.outcome.is_ok()
    }
}
