//! Curated knowledge store
//!
//! An immutable, ordered list of topic entries loaded once at startup.
//! Entry identity is positional; retrieval relies on that order for ties.

pub mod entry;
pub mod loader;

pub use entry::{KnowledgeBase, KnowledgeEntry};
