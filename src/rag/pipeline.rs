// End-to-end query pipeline: validate -> screen -> retrieve -> compose
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::errors::{Result, ServiceError};
use crate::knowledge::KnowledgeBase;
use crate::rag::composer::ResponseComposer;
use crate::rag::retrieval::Retriever;
use crate::safety::detect_distress;

/// Message reported when a query arrives without text
pub const MISSING_MESSAGE: &str = "No message provided";

/// Incoming query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl QueryRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Result of one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    pub distress_detected: bool,
    pub context_used: bool,
    pub relevant_topics: Vec<String>,
}

/// Stateless query service over a shared, read-only knowledge base
#[derive(Clone)]
pub struct RagService {
    knowledge: Arc<KnowledgeBase>,
    retriever: Retriever,
    composer: ResponseComposer,
}

impl RagService {
    pub fn new(knowledge: Arc<KnowledgeBase>, composer: ResponseComposer) -> Self {
        Self {
            knowledge,
            retriever: Retriever::new(),
            composer,
        }
    }

    /// Answer a query.
    ///
    /// Missing or blank messages are rejected with
    /// [`ServiceError::InvalidInput`] before any component runs. Generation
    /// failures never surface here; the composer substitutes its fallback.
    pub async fn handle(&self, request: QueryRequest) -> Result<QueryResponse> {
        let message = request
            .message
            .filter(|message| !message.trim().is_empty())
            .ok_or_else(|| ServiceError::InvalidInput(MISSING_MESSAGE.to_string()))?;

        // Both are pure and cheap; neither waits on generation
        let distress_detected = detect_distress(&message);
        let contexts = self.retriever.retrieve(&message, &self.knowledge);

        let response = self.composer.compose(&message, &contexts).await;
        let relevant_topics: Vec<String> = contexts.iter().map(|ctx| ctx.topic.clone()).collect();

        info!(
            topics = ?relevant_topics,
            distress_detected,
            "Processed query"
        );

        Ok(QueryResponse {
            response,
            distress_detected,
            context_used: !contexts.is_empty(),
            relevant_topics,
        })
    }

    /// Convenience wrapper around [`RagService::handle`]
    pub async fn query(&self, message: &str) -> Result<QueryResponse> {
        self.handle(QueryRequest::new(message)).await
    }

    /// Number of loaded knowledge entries
    pub fn knowledge_size(&self) -> usize {
        self.knowledge.len()
    }
}
