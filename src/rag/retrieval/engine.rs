// Retrieval engine: filter, score, rank and truncate knowledge entries
use serde::{Deserialize, Serialize};

use crate::knowledge::{KnowledgeBase, KnowledgeEntry};
use crate::rag::scoring::ScoreWeights;

/// Maximum number of entries returned for one query
pub const MAX_RESULTS: usize = 3;

/// A knowledge entry scored against one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredContext {
    pub topic: String,
    pub content: String,
    pub relevance_score: u64,
}

/// At most [`MAX_RESULTS`] contexts, highest score first
pub type RetrievalResult = Vec<ScoredContext>;

/// Retrieval engine for keyword search
#[derive(Debug, Clone, Default)]
pub struct Retriever {
    weights: ScoreWeights,
}

impl Retriever {
    /// Create new retriever with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the most relevant entries for a query.
    ///
    /// An entry is a candidate when a query word occurs inside its topic or
    /// content, or when one of its keywords occurs inside the query. Note
    /// the keyword check runs in the opposite direction. Candidates are
    /// stable-sorted by score, so equal scores keep knowledge base order.
    pub fn retrieve(&self, query: &str, base: &KnowledgeBase) -> RetrievalResult {
        let query_lower = query.to_lowercase();
        let words: Vec<&str> = query_lower.split_whitespace().collect();

        let mut candidates: Vec<ScoredContext> = base
            .entries()
            .iter()
            .filter(|entry| is_candidate(&query_lower, &words, entry))
            .map(|entry| ScoredContext {
                topic: entry.topic.clone(),
                content: entry.content.clone(),
                // Scoring lower-cases on its own, so it gets the caller's query
                relevance_score: self.weights.score(query, entry),
            })
            .collect();

        candidates.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        candidates.truncate(MAX_RESULTS);
        candidates
    }
}

fn is_candidate(query_lower: &str, words: &[&str], entry: &KnowledgeEntry) -> bool {
    let topic = entry.topic.to_lowercase();
    let content = entry.content.to_lowercase();

    words.iter().any(|word| topic.contains(word))
        || words.iter().any(|word| content.contains(word))
        || entry
            .keywords
            .iter()
            .any(|keyword| query_lower.contains(&keyword.to_lowercase()))
}

/// Retrieve with the default weights
pub fn retrieve(query: &str, base: &KnowledgeBase) -> RetrievalResult {
    Retriever::new().retrieve(query, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    fn entry(topic: &str, content: &str, keywords: &[&str]) -> KnowledgeEntry {
        KnowledgeEntry::new(topic, content).with_keywords(keywords.iter().copied())
    }

    fn sample_base() -> KnowledgeBase {
        KnowledgeBase::new(vec![
            entry("Sleep", "Keep a regular routine.", &["insomnia"]),
            entry("Anxiety", "Breathing exercises help.", &["panic", "breathing"]),
            entry("Grief", "Loss takes time to process.", &[]),
            entry("Stress", "Exercise and rest reduce stress.", &["overwhelmed"]),
        ])
    }

    #[test]
    fn test_empty_base_returns_nothing() {
        assert!(retrieve("anxiety", &KnowledgeBase::empty()).is_empty());
    }

    #[test]
    fn test_no_match_returns_nothing() {
        assert!(retrieve("xyzzy", &sample_base()).is_empty());
        assert!(retrieve("", &sample_base()).is_empty());
    }

    #[test]
    fn test_keyword_inside_query() {
        let base = KnowledgeBase::new(vec![entry("Anxiety", "Breathing exercises help.", &["anxiety"])]);
        let result = retrieve("I have anxietydisorder", &base);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].topic, "Anxiety");
    }

    #[test]
    fn test_keyword_found_in_multi_word_query() {
        let base = KnowledgeBase::new(vec![entry("Calm", "Slow down.", &["anxiety"])]);
        let result = retrieve("I have anxiety disorder", &base);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].topic, "Calm");
        // Only the keyword matches: "anxiety" (4) and "i" inside it (4)
        assert_eq!(result[0].relevance_score, 8);
    }

    #[test]
    fn test_keyword_direction_is_not_reversed() {
        // The query word "pan" is inside the keyword "panic", but keywords are
        // only checked for containment in the query.
        let base = KnowledgeBase::new(vec![entry("Calm", "Slow down.", &["panic"])]);
        assert!(retrieve("pan", &base).is_empty());
    }

    #[test]
    fn test_sorted_by_score() {
        let result = retrieve("stress exercise", &sample_base());
        let topics: Vec<&str> = result.iter().map(|c| c.topic.as_str()).collect();
        // Stress: "stress" topic+content (5), "exercise" content (2) = 7
        // Anxiety: "exercise" content (2) = 2
        assert_eq!(topics, vec!["Stress", "Anxiety"]);
        assert_eq!(result[0].relevance_score, 7);
        assert_eq!(result[1].relevance_score, 2);
    }

    #[test]
    fn test_ties_keep_base_order() {
        let base = KnowledgeBase::new(vec![
            entry("First", "shared text", &[]),
            entry("Second", "shared text", &[]),
            entry("Third", "shared text", &[]),
        ]);
        let result = retrieve("shared", &base);
        let topics: Vec<&str> = result.iter().map(|c| c.topic.as_str()).collect();
        assert_eq!(topics, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let base = KnowledgeBase::new(
            (0..6)
                .map(|i| entry(&format!("Topic {}", i), "common words", &[]))
                .collect(),
        );
        let result = retrieve("common", &base);
        assert_eq!(result.len(), MAX_RESULTS);
        assert_eq!(result[0].topic, "Topic 0");
        assert_eq!(result[2].topic, "Topic 2");
    }

    #[test]
    fn test_keyword_candidates_score_by_word() {
        // Multi-word keywords admit the entry; scoring still goes word by word
        let base = KnowledgeBase::new(vec![entry("Focus", "Attention.", &["present moment"])]);
        let result = retrieve("living in the present moment", &base);
        assert_eq!(result.len(), 1);
        assert!(result[0].relevance_score > 0);

        let base = KnowledgeBase::new(vec![entry("Crisis", "Call someone.", &["hotline"])]);
        let result = retrieve("HOTLINE", &base);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].relevance_score, 4);
    }

    #[test]
    fn test_retrieval_is_idempotent() {
        let base = sample_base();
        let before = base.clone();
        let first = retrieve("panic and stress", &base);
        let second = retrieve("panic and stress", &base);
        assert_eq!(first, second);
        assert_eq!(base, before);
    }

    #[derive(Debug, Clone)]
    struct Words(String);

    impl Arbitrary for Words {
        fn arbitrary(g: &mut Gen) -> Self {
            let vocabulary = [
                "panic", "stress", "sleep", "loss", "rest", "help", "a", "the", "time",
                "breathing", "xyz",
            ];
            let len = usize::arbitrary(g) % 8;
            let words: Vec<&str> = (0..len).map(|_| *g.choose(&vocabulary).unwrap()).collect();
            Words(words.join(" "))
        }
    }

    #[quickcheck]
    fn prop_result_bounded_and_sorted(query: Words) -> bool {
        let result = retrieve(&query.0, &sample_base());
        result.len() <= MAX_RESULTS
            && result
                .windows(2)
                .all(|pair| pair[0].relevance_score >= pair[1].relevance_score)
    }
}
