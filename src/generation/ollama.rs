//! Ollama streaming backend
//!
//! Streams `/api/generate` output and reassembles it into one reply.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::errors::{Result, ServiceError};
use crate::generation::backend::{
    GenerationBackend, GenerationError, GenerationRequest, GenerationResult,
};
use crate::generation::parser::JsonParser;

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default model
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:7b-instruct";

/// Ollama streaming backend
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaBackend {
    /// Create Ollama backend with custom configuration
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServiceError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Get current model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            GenerationError::ConnectionFailed(format!(
                "Cannot connect to Ollama at {}. Is Ollama running?",
                self.base_url
            ))
        } else {
            GenerationError::ConnectionFailed(e.to_string())
        }
    }
}

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Clone, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            system: &request.system,
            stream: true,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut stream = response.bytes_stream();
        let mut parser = JsonParser::new();
        let mut text = String::new();
        let mut finished = false;

        'read: while let Some(bytes) = stream.next().await {
            let bytes = bytes.map_err(|e| self.map_transport_error(e))?;
            for object in parser.push(&bytes)? {
                let chunk = JsonParser::parse_chunk(&object)?;
                if let Some(error) = chunk.error {
                    return Err(GenerationError::InvalidResponse(error));
                }
                text.push_str(&chunk.response);
                if chunk.done {
                    finished = true;
                    break 'read;
                }
            }
        }

        if !finished {
            return Err(GenerationError::InvalidResponse(
                "Stream ended before completion".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse("Empty response".to_string()));
        }

        Ok(text)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/version", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
