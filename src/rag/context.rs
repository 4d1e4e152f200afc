// Context block and grounding prompt assembly
use crate::rag::retrieval::ScoredContext;

/// System instruction sent with every generation request
pub const SYSTEM_INSTRUCTION: &str = "You are a compassionate mental health support assistant.";

/// Persona line opening the grounding prompt
pub const PERSONA_INSTRUCTION: &str = "You are a compassionate mental health support assistant. Use the following knowledge to help answer the user's question.";

/// Closing instruction of the grounding prompt
pub const ANSWER_INSTRUCTION: &str = "Please provide a helpful, empathetic response based on the context provided. If the context doesn't contain relevant information, provide general supportive guidance while encouraging professional help when appropriate.";

/// Serialize retrieved contexts as "Topic:/Content:" pairs separated by a
/// blank line. No contexts yields an empty string.
pub fn context_block(contexts: &[ScoredContext]) -> String {
    contexts
        .iter()
        .map(|ctx| format!("Topic: {}\nContent: {}", ctx.topic, ctx.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the grounding prompt around the verbatim user message
pub fn build_prompt(user_message: &str, contexts: &[ScoredContext]) -> String {
    format!(
        "{}\n\nContext from knowledge base:\n{}\n\nUser question: {}\n\n{}",
        PERSONA_INSTRUCTION,
        context_block(contexts),
        user_message,
        ANSWER_INSTRUCTION
    )
}
