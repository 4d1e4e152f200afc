// Relevance scoring for knowledge entries
pub mod scorer;

pub use scorer::{score, ScoreWeights, CONTENT_MATCH_WEIGHT, KEYWORD_MATCH_WEIGHT, TOPIC_MATCH_WEIGHT};
