//! Error types for Mindbridge
//!
//! Separates caller mistakes (rejected explicitly) from internal faults.
//! Quality-only failures such as an unavailable generation backend never
//! reach this type; they are absorbed by the response composer.

use thiserror::Error;

/// Main error type for the Mindbridge service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Caller supplied an empty or missing message
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Knowledge source could not be read or parsed
    #[error("Knowledge load error: {0}")]
    KnowledgeLoad(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unexpected fault while serving a query
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// True when the caller is at fault and the request should be rejected
    /// rather than reported as a server failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::InvalidInput(_))
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Convert anyhow errors to ServiceError
impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
