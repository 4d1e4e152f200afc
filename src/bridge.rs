//! Client for a remote Mindbridge service
//!
//! Forwards messages to `/rag/query` and answers locally with a
//! topic-aware reply whenever the service is unhealthy or the call fails,
//! so a chat front end always has something to show.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::{Result, ServiceError};
use crate::rag::pipeline::{QueryRequest, QueryResponse};
use crate::safety::detect_distress;

/// Default service URL
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5001";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

pub const ANXIETY_REPLY: &str = "I understand you're feeling anxious. Try taking deep breaths and remember that this feeling will pass. If anxiety persists, consider speaking with a mental health professional.";
pub const DEPRESSION_REPLY: &str = "I hear that you're going through a difficult time. You're not alone, and it's okay to ask for help. Consider reaching out to a counselor or therapist.";
pub const STRESS_REPLY: &str = "Stress can be overwhelming. Try to take breaks, practice relaxation techniques, and don't hesitate to seek support from friends, family, or professionals.";
pub const DEFAULT_REPLY: &str = "Thank you for sharing with me. While I'm here to listen, I encourage you to speak with a mental health professional who can provide personalized support and guidance.";

/// Reply returned to the caller of the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeReply {
    pub response: String,
    pub distress_detected: bool,
    pub context_used: bool,
    pub relevant_topics: Vec<String>,
    /// True when the reply was produced locally
    pub fallback: bool,
}

impl From<QueryResponse> for BridgeReply {
    fn from(response: QueryResponse) -> Self {
        Self {
            response: response.response,
            distress_detected: response.distress_detected,
            context_used: response.context_used,
            relevant_topics: response.relevant_topics,
            fallback: false,
        }
    }
}

/// Pick a local reply by the first matching topic group.
pub fn offline_reply(message: &str) -> BridgeReply {
    let lower = message.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    let response = if mentions(&["anxious", "anxiety", "worried"]) {
        ANXIETY_REPLY
    } else if mentions(&["depressed", "sad", "hopeless"]) {
        DEPRESSION_REPLY
    } else if mentions(&["stress", "overwhelmed"]) {
        STRESS_REPLY
    } else {
        DEFAULT_REPLY
    };

    BridgeReply {
        response: response.to_string(),
        distress_detected: detect_distress(message),
        context_used: false,
        relevant_topics: Vec::new(),
        fallback: true,
    }
}

/// Remote service client with cached health state
#[derive(Debug, Clone)]
pub struct RagBridge {
    client: Client,
    base_url: String,
    healthy: Arc<AtomicBool>,
}

impl RagBridge {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(QUERY_TIMEOUT)
            .build()
            .map_err(ServiceError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            healthy: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Last observed health state
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    /// Probe `/health` and cache the result.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        let healthy = match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "RAG service is not available");
                false
            }
        };
        self.healthy.store(healthy, Ordering::SeqCst);
        healthy
    }

    /// Query the service, falling back to a local reply on any failure.
    pub async fn query(&self, message: &str) -> BridgeReply {
        if !self.is_healthy() && !self.check_health().await {
            return offline_reply(message);
        }

        match self.forward(message).await {
            Ok(response) => response.into(),
            Err(e) => {
                warn!(error = %e, "Error querying RAG service");
                self.healthy.store(false, Ordering::SeqCst);
                offline_reply(message)
            }
        }
    }

    async fn forward(&self, message: &str) -> Result<QueryResponse> {
        let url = format!("{}/rag/query", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&QueryRequest::new(message))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Re-check health every `interval` in the background.
    pub fn spawn_health_monitor(&self, interval: Duration) -> JoinHandle<()> {
        let bridge = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                bridge.check_health().await;
            }
        })
    }
}
