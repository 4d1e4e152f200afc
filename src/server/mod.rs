//! HTTP server implementation using Axum.

pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::rag::RagService;

/// Build the Axum router with all routes.
pub fn build_router(service: RagService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/rag/query", post(routes::query))
        .route("/health", get(routes::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Bind `address` and serve until the process is stopped.
pub async fn serve(service: RagService, address: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!(
        address = %listener.local_addr()?,
        knowledge_entries = service.knowledge_size(),
        "Starting Mental Health RAG service"
    );
    axum::serve(listener, build_router(service)).await?;
    Ok(())
}
