// Response composer: grounding prompt -> generation backend -> reply text
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::generation::{GenerationBackend, GenerationError, GenerationRequest};
use crate::rag::context::{build_prompt, SYSTEM_INSTRUCTION};
use crate::rag::retrieval::ScoredContext;

/// Reply used whenever generation fails
pub const FALLBACK_RESPONSE: &str = "I'm here to help, but I'm having trouble processing your request right now. Please consider reaching out to a mental health professional for support.";

/// Generation parameters applied to every request
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for ComposerSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Outcome of one composition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    Generated(String),
    Fallback { reason: GenerationError },
}

impl Composition {
    /// Reply text shown to the user
    pub fn text(&self) -> &str {
        match self {
            Composition::Generated(text) => text,
            Composition::Fallback { .. } => FALLBACK_RESPONSE,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Composition::Generated(text) => text,
            Composition::Fallback { .. } => FALLBACK_RESPONSE.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Composition::Fallback { .. })
    }
}

/// Builds the grounding prompt and delegates to a generation backend
#[derive(Clone)]
pub struct ResponseComposer {
    backend: Arc<dyn GenerationBackend>,
    settings: ComposerSettings,
}

impl ResponseComposer {
    pub fn new(backend: Arc<dyn GenerationBackend>, settings: ComposerSettings) -> Self {
        Self { backend, settings }
    }

    /// Compose a reply, substituting [`FALLBACK_RESPONSE`] on any failure.
    pub async fn compose(&self, user_message: &str, contexts: &[ScoredContext]) -> String {
        self.try_compose(user_message, contexts).await.into_text()
    }

    /// Compose a reply and report whether the fallback was used and why.
    pub async fn try_compose(&self, user_message: &str, contexts: &[ScoredContext]) -> Composition {
        let request = GenerationRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(user_message, contexts),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let outcome = tokio::time::timeout(self.settings.timeout, self.backend.generate(&request))
            .await
            .unwrap_or(Err(GenerationError::Timeout(self.settings.timeout.as_secs())));

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                debug!(backend = self.backend.name(), chars = text.len(), "Generated response");
                Composition::Generated(text)
            }
            Ok(_) => {
                let reason = GenerationError::InvalidResponse("Empty response".to_string());
                warn!(backend = self.backend.name(), error = %reason, "Error generating response");
                Composition::Fallback { reason }
            }
            Err(reason) => {
                warn!(backend = self.backend.name(), error = %reason, "Error generating response");
                Composition::Fallback { reason }
            }
        }
    }
}
