// Knowledge entries and the ordered knowledge base
use serde::{Deserialize, Serialize};

/// One topic record in the knowledge base.
///
/// Unknown fields in the source (such as a numeric `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub topic: String,
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl KnowledgeEntry {
    /// Create an entry without keywords
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
            keywords: Vec::new(),
        }
    }

    /// Attach keywords, replacing any existing ones
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered, read-only collection of knowledge entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-ordered list of entries
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Entries in load order
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default topics shipped with the service, for running without a
    /// knowledge file.
    pub fn builtin() -> Self {
        Self::new(vec![
            KnowledgeEntry::new(
                "anxiety",
                "Anxiety is a normal and often healthy emotion. However, when a person regularly feels disproportionate levels of anxiety, it might become a medical disorder. Techniques like deep breathing, mindfulness, and cognitive behavioral therapy can help manage anxiety.",
            )
            .with_keywords(["anxious", "worried", "panic", "nervous", "breathing"]),
            KnowledgeEntry::new(
                "depression",
                "Depression is a common and serious medical illness that negatively affects how you feel, the way you think, and how you act. It's characterized by persistent feelings of sadness and loss of interest in activities once enjoyed. It's important to seek professional help if experiencing symptoms of depression.",
            )
            .with_keywords(["depressed", "sad", "sadness", "empty", "hopeless"]),
            KnowledgeEntry::new(
                "stress",
                "Stress is your body's reaction to pressure from a certain situation or event. It can be positive as a short-term motivator but can negatively impact health when chronic. Stress management techniques include regular exercise, adequate sleep, and relaxation practices.",
            )
            .with_keywords(["stressed", "overwhelmed", "pressure", "burnout"]),
            KnowledgeEntry::new(
                "mindfulness",
                "Mindfulness is the practice of purposely focusing your attention on the present moment and accepting it without judgment. Regular mindfulness practice can reduce stress, improve focus, and increase emotional regulation.",
            )
            .with_keywords(["meditation", "present moment", "grounding"]),
            KnowledgeEntry::new(
                "self_care",
                "Self-care means taking the time to do things that help you live well and improve both your physical health and mental health. Self-care can include maintaining a regular sleep routine, eating healthy, spending time in nature, or engaging in hobbies.",
            )
            .with_keywords(["self-care", "sleep", "routine", "hobbies"]),
        ])
    }
}

impl From<Vec<KnowledgeEntry>> for KnowledgeBase {
    fn from(entries: Vec<KnowledgeEntry>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keywords_default_to_empty() {
        let entry: KnowledgeEntry =
            serde_json::from_str(r#"{"id": 7, "topic": "sleep", "content": "Rest well."}"#).unwrap();
        assert_eq!(entry.topic, "sleep");
        assert!(entry.keywords.is_empty());
    }

    #[test]
    fn test_builtin_topics_in_order() {
        let base = KnowledgeBase::builtin();
        let topics: Vec<&str> = base.entries().iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec!["anxiety", "depression", "stress", "mindfulness", "self_care"]
        );
    }

    #[test]
    fn test_empty_base() {
        let base = KnowledgeBase::empty();
        assert!(base.is_empty());
        assert_eq!(base.len(), 0);
    }
}
