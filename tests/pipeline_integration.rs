//! Query Pipeline Integration Tests
//!
//! Exercises the public service API end to end with a scripted backend.

use std::sync::Arc;
use std::time::Duration;

use mindbridge::generation::{GenerationError, ScriptedBackend};
use mindbridge::rag::{ComposerSettings, ResponseComposer, FALLBACK_RESPONSE};
use mindbridge::{KnowledgeBase, KnowledgeEntry, QueryRequest, RagService, ServiceError};

fn anxiety_base() -> KnowledgeBase {
    KnowledgeBase::new(vec![KnowledgeEntry::new("Anxiety", "Breathing exercises help.")
        .with_keywords(["panic", "breathing"])])
}

fn service_with(base: KnowledgeBase, backend: Arc<ScriptedBackend>) -> RagService {
    let composer = ResponseComposer::new(backend, ComposerSettings::default());
    RagService::new(Arc::new(base), composer)
}

#[tokio::test]
async fn test_panic_attack_scenario() {
    let backend = Arc::new(ScriptedBackend::replying("Try slow breathing."));
    let service = service_with(anxiety_base(), backend.clone());

    let response = service.query("I'm having a panic attack").await.unwrap();

    assert_eq!(response.relevant_topics, vec!["Anxiety".to_string()]);
    assert!(response.context_used);
    assert!(!response.distress_detected);
    assert_eq!(response.response, "Try slow breathing.");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("Topic: Anxiety"));
    assert!(requests[0].prompt.contains("User question: I'm having a panic attack"));
}

#[tokio::test]
async fn test_distress_flag_is_independent_of_retrieval() {
    let backend = Arc::new(ScriptedBackend::replying("You are not alone."));
    let service = service_with(KnowledgeBase::empty(), backend);

    let response = service.query("I want to end it all").await.unwrap();

    assert!(response.distress_detected);
    assert!(!response.context_used);
    assert!(response.relevant_topics.is_empty());
    assert_eq!(response.response, "You are not alone.");
}

#[tokio::test]
async fn test_backend_failure_uses_fallback() {
    let backend = Arc::new(ScriptedBackend::failing(GenerationError::Api {
        status: 503,
        message: "overloaded".to_string(),
    }));
    let service = service_with(anxiety_base(), backend);

    let response = service.query("panic").await.unwrap();

    assert_eq!(response.response, FALLBACK_RESPONSE);
    assert_eq!(response.relevant_topics, vec!["Anxiety".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out_to_fallback() {
    let backend = Arc::new(ScriptedBackend::replying("late").with_delay(Duration::from_secs(120)));
    let composer = ResponseComposer::new(
        backend,
        ComposerSettings {
            timeout: Duration::from_secs(5),
            ..ComposerSettings::default()
        },
    );
    let service = RagService::new(Arc::new(anxiety_base()), composer);

    let response = service.query("panic").await.unwrap();
    assert_eq!(response.response, FALLBACK_RESPONSE);
}

#[tokio::test]
async fn test_missing_message_never_reaches_backend() {
    let backend = Arc::new(ScriptedBackend::replying("unused"));
    let service = service_with(anxiety_base(), backend.clone());

    let missing = service.handle(QueryRequest::default()).await;
    assert!(matches!(missing, Err(ServiceError::InvalidInput(_))));

    let blank = service.query("   ").await;
    assert!(matches!(blank, Err(ServiceError::InvalidInput(_))));

    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_builtin_base_ranks_at_most_three() {
    let backend = Arc::new(ScriptedBackend::replying("ok"));
    let service = service_with(KnowledgeBase::builtin(), backend);

    // "a" occurs in every builtin entry
    let response = service.query("a stressed and anxious day").await.unwrap();
    assert_eq!(response.relevant_topics.len(), 3);
    assert_eq!(response.relevant_topics[0], "anxiety");
}

#[tokio::test]
async fn test_shipped_knowledge_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mental_health_knowledge.json");
    let base = KnowledgeBase::try_load(path).unwrap();
    assert!(base.len() >= 5);
    assert!(base.entries().iter().all(|e| !e.keywords.is_empty()));
}
