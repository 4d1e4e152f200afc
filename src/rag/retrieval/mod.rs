// Keyword retrieval over the knowledge base
pub mod engine;

pub use engine::{retrieve, RetrievalResult, Retriever, ScoredContext, MAX_RESULTS};
