// Retrieval-augmented response pipeline
//
// Components:
// - Scoring: keyword relevance of one entry against a query
// - Retrieval: candidate filter, ranking and top-3 truncation
// - Context: context block and grounding prompt text
// - Composer: generation call with fixed fallback
// - Pipeline: end-to-end query handling

pub mod composer;
pub mod context;
pub mod pipeline;
pub mod retrieval;
pub mod scoring;

// Re-export key types
pub use composer::{ComposerSettings, Composition, ResponseComposer, FALLBACK_RESPONSE};
pub use pipeline::{QueryRequest, QueryResponse, RagService};
pub use retrieval::{retrieve, RetrievalResult, Retriever, ScoredContext};
pub use scoring::{score, ScoreWeights};
