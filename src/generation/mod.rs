//! Text generation backends
//!
//! The service treats generation as an opaque capability behind
//! [`GenerationBackend`]. Backends are constructed from configuration and
//! passed in explicitly, so tests substitute [`ScriptedBackend`].

pub mod backend;
pub mod ollama;
pub mod openai;
pub mod parser;

pub use backend::{
    GenerationBackend, GenerationError, GenerationRequest, GenerationResult, ScriptedBackend,
};
pub use ollama::{OllamaBackend, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
pub use openai::{OpenAiBackend, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_URL};

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::config::{GenerationConfig, Provider};
use crate::errors::Result;

/// Build the configured backend.
pub fn build_backend(config: &GenerationConfig) -> Result<Arc<dyn GenerationBackend>> {
    let timeout = Duration::from_secs(config.timeout_secs);

    match config.provider {
        Provider::OpenAi => {
            let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
            if api_key.is_empty() {
                warn!(
                    env = %config.api_key_env,
                    "No API key set; generation will fall back to the default reply"
                );
            }
            let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_URL);
            let backend = OpenAiBackend::new(base_url, &api_key, &config.model, timeout)?;
            Ok(Arc::new(backend))
        }
        Provider::Ollama => {
            let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OLLAMA_URL);
            let backend = OllamaBackend::new(base_url, &config.model, timeout)?;
            Ok(Arc::new(backend))
        }
    }
}
