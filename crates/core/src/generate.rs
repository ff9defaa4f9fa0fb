//! Collaborator traits for the generation boundary.
//!
//! The chaining orchestrator never talks to a completion API directly — it
//! is handed a [`Generator`] (one LLM call) and a [`Combiner`] (merge of
//! partial results). Production wires in an HTTP-backed generator; tests
//! inject scripted mocks and count invocations.

use async_trait::async_trait;

use crate::error::GeneratorError;

/// The LLM completion collaborator: one prompt in, one text completion out.
///
/// Output is text rather than a generic payload because the hierarchical
/// chaining strategy splices earlier results back into later prompts.
/// Implementations own their transport, timeouts, and retries; the
/// orchestrator propagates any failure without salvage.
#[async_trait]
pub trait Generator: Send + Sync {
    /// A human-readable name for this generator (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Run a single completion call.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GeneratorError>;
}

/// Merges the partial results of a chained generation into one.
pub trait Combiner: Send + Sync {
    fn combine(&self, parts: Vec<String>) -> String;
}

/// Any plain `Fn(Vec<String>) -> String` is a combiner.
impl<F> Combiner for F
where
    F: Fn(Vec<String>) -> String + Send + Sync,
{
    fn combine(&self, parts: Vec<String>) -> String {
        self(parts)
    }
}

/// Default combiner: joins parts as delimited sections.
pub struct SectionJoinCombiner;

impl Combiner for SectionJoinCombiner {
    fn combine(&self, parts: Vec<String>) -> String {
        parts.join("\n\n---\n\n")
    }
}
