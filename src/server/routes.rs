//! Request handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::errors::ServiceError;
use crate::rag::pipeline::{QueryRequest, MISSING_MESSAGE};
use crate::rag::RagService;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "Mental Health RAG";

/// Error body mapping: caller mistakes are 400, everything else 500.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": MISSING_MESSAGE })))
                .into_response();
        }
        error!(error = %self, "Error processing query");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}

/// POST /rag/query
///
/// The pipeline runs on its own task so a panic inside any component is
/// reported as an internal error instead of dropping the connection.
pub async fn query(State(service): State<RagService>, body: Bytes) -> Response {
    let request: QueryRequest = if body.is_empty() {
        QueryRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(_) => return ServiceError::InvalidInput(MISSING_MESSAGE.to_string()).into_response(),
        }
    };

    let outcome = tokio::spawn(async move { service.handle(request).await })
        .await
        .unwrap_or_else(|e| Err(ServiceError::Internal(e.to_string())));

    match outcome {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /health
pub async fn health_check(State(service): State<RagService>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "knowledge_entries": service.knowledge_size(),
    }))
}
