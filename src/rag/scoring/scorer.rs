// Keyword relevance scorer for knowledge entries
use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeEntry;

/// Points for a query word found inside the entry topic
pub const TOPIC_MATCH_WEIGHT: u64 = 3;

/// Points for a query word found inside the entry content
pub const CONTENT_MATCH_WEIGHT: u64 = 2;

/// Points for a query word found inside any entry keyword
pub const KEYWORD_MATCH_WEIGHT: u64 = 4;

/// Per-field weights used when scoring an entry against a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub topic: u64,
    pub content: u64,
    pub keyword: u64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            topic: TOPIC_MATCH_WEIGHT,
            content: CONTENT_MATCH_WEIGHT,
            keyword: KEYWORD_MATCH_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Score an entry against a query.
    ///
    /// The query is lower-cased and split on whitespace. Each word earns
    /// points for every field it appears in as a substring, so "anx"
    /// matches a topic of "Anxiety". Repeated words count every time.
    pub fn score(&self, query: &str, entry: &KnowledgeEntry) -> u64 {
        let query = query.to_lowercase();
        let topic = entry.topic.to_lowercase();
        let content = entry.content.to_lowercase();
        let keywords: Vec<String> = entry.keywords.iter().map(|k| k.to_lowercase()).collect();

        query
            .split_whitespace()
            .map(|word| {
                let mut points = 0;
                if topic.contains(word) {
                    points += self.topic;
                }
                if content.contains(word) {
                    points += self.content;
                }
                if keywords.iter().any(|keyword| keyword.contains(word)) {
                    points += self.keyword;
                }
                points
            })
            .sum()
    }
}

/// Score an entry with the default weights
pub fn score(query: &str, entry: &KnowledgeEntry) -> u64 {
    ScoreWeights::default().score(query, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn anxiety_entry() -> KnowledgeEntry {
        KnowledgeEntry::new("Anxiety", "Breathing exercises help.")
            .with_keywords(["panic", "breathing"])
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.topic, 3);
        assert_eq!(weights.content, 2);
        assert_eq!(weights.keyword, 4);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(score("", &anxiety_entry()), 0);
        assert_eq!(score("   \t ", &anxiety_entry()), 0);
    }

    #[test]
    fn test_keyword_only_match() {
        assert_eq!(score("I'm having panic", &anxiety_entry()), 4);
    }

    #[test]
    fn test_single_letter_words_match_everywhere() {
        // "a" occurs in the topic, the content and a keyword: 3 + 2 + 4,
        // plus 4 for "panic"
        assert_eq!(score("I'm having a panic attack", &anxiety_entry()), 13);
    }

    #[test]
    fn test_all_fields_accumulate() {
        // "breathing" hits content (2) and keyword (4); "anxiety" hits topic (3)
        assert_eq!(score("anxiety breathing", &anxiety_entry()), 9);
    }

    #[test]
    fn test_partial_word_matches_count() {
        // "anx" is inside the topic; "eat" is inside "breathing" in both content and keywords
        assert_eq!(score("anx", &anxiety_entry()), 3);
        assert_eq!(score("eat", &anxiety_entry()), 2 + 4);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            score("ANXIETY", &anxiety_entry()),
            score("anxiety", &anxiety_entry())
        );
    }

    #[test]
    fn test_repeated_words_count_each_time() {
        assert_eq!(score("panic panic", &anxiety_entry()), 8);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            topic: 10,
            content: 0,
            keyword: 1,
        };
        assert_eq!(weights.score("anxiety panic", &anxiety_entry()), 11);
    }

    #[quickcheck]
    fn prop_score_bounded_by_word_count(query: String) -> bool {
        let words = query.to_lowercase().split_whitespace().count() as u64;
        let max_per_word = TOPIC_MATCH_WEIGHT + CONTENT_MATCH_WEIGHT + KEYWORD_MATCH_WEIGHT;
        score(&query, &anxiety_entry()) <= words * max_per_word
    }

    #[quickcheck]
    fn prop_score_is_deterministic(query: String) -> bool {
        let entry = anxiety_entry();
        score(&query, &entry) == score(&query, &entry)
    }
}
