//! Mindbridge - knowledge-grounded mental health support service
//!
//! Answers a user message by ranking entries of a small curated knowledge
//! base by keyword overlap, flagging distress phrases, and asking a text
//! generation backend for a reply grounded in the top matches.
//!
//! # Architecture
//!
//! - **knowledge**: knowledge entries and the JSON loader
//! - **safety**: distress phrase screening
//! - **rag**: scoring, retrieval, prompt assembly, composition, pipeline
//! - **generation**: pluggable text generation backends
//! - **server**: HTTP surface over the pipeline
//! - **bridge**: remote client with offline fallback replies

pub mod errors;
pub mod config;

pub mod knowledge;
pub mod safety;
pub mod rag;
pub mod generation;

pub mod server;
pub mod bridge;
pub mod cli;
pub mod doctor;

// Re-export commonly used types
pub use errors::{Result, ServiceError};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use rag::{QueryRequest, QueryResponse, RagService};
