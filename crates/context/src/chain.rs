//! Chained generation — multi-pass generation for contexts that exceed
//! the token window.
//!
//! Two strategies:
//!
//! - **Sequential**: chunks are greedily batched in priority order; one
//!   generation call per batch; partial results merged by the combiner.
//! - **Hierarchical**: critical chunks (priority < 3) are condensed into a
//!   summary first; remaining chunks are then batched and each batch is
//!   sent together with the running summary for refinement.
//!
//! Batches are always generated one at a time, never concurrently, to
//! respect per-request limits of the completion service. There is no retry
//! or partial-result salvage here: a failed generator call aborts the whole
//! run and the error propagates to the caller.

use colloquy_core::{Combiner, Generator, GeneratorError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assembler::{build_prompt_within_limit, render_section};
use crate::chunker::{ChainStrategy, ChunkStrategy, ChunkedContext, ContextChunk};
use crate::token::estimate_tokens;

/// Tokens held back per batch for instructions and estimation error.
const CHAIN_MARGIN_TOKENS: usize = 2_000;

/// Chunks below this priority rank are "critical" for the hierarchical
/// strategy (the first three slots of the default priority order).
const CRITICAL_PRIORITY_CUTOFF: usize = 3;

/// How a generation run was actually executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassStrategy {
    SinglePass,
    Sequential,
    Hierarchical,
}

impl std::fmt::Display for PassStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SinglePass => "single-pass",
            Self::Sequential => "sequential",
            Self::Hierarchical => "hierarchical",
        };
        f.write_str(s)
    }
}

/// The outcome of a (possibly chained) generation run.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// The combined result text.
    pub result: String,

    /// Which strategy actually ran.
    pub strategy: PassStrategy,

    /// Number of generator calls made.
    pub iterations: usize,

    /// Unique id for this run, for audit logging.
    pub run_id: String,

    /// Estimated prompt tokens per generator call, in call order.
    pub prompt_tokens: Vec<usize>,
}

/// Errors from chained generation.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Generation call failed: {0}")]
    Generator(#[from] GeneratorError),
}

/// Run generation over a chunked context, chaining when it does not fit.
///
/// - Context fits (`!needs_chaining`): one fitted prompt, one call.
/// - Otherwise the context's `chain_strategy` decides between sequential
///   batching and hierarchical summarize-then-refine.
pub async fn generate_with_chaining<G, C>(
    context: &ChunkedContext,
    base_prompt: &str,
    generator: &G,
    combiner: &C,
    strategy: &ChunkStrategy,
) -> Result<ChainOutcome, ChainError>
where
    G: Generator + ?Sized,
    C: Combiner + ?Sized,
{
    let run_id = Uuid::new_v4().to_string();

    if !context.needs_chaining {
        let fitted = build_prompt_within_limit(context, base_prompt, strategy.max_tokens);
        let tokens = estimate_tokens(&fitted.prompt);
        info!(
            run_id = %run_id,
            generator = generator.name(),
            prompt_tokens = tokens,
            "Single-pass generation"
        );
        let result = generator.generate(&fitted.prompt).await?;
        return Ok(ChainOutcome {
            result,
            strategy: PassStrategy::SinglePass,
            iterations: 1,
            run_id,
            prompt_tokens: vec![tokens],
        });
    }

    match context.chain_strategy.unwrap_or(ChainStrategy::Sequential) {
        ChainStrategy::Sequential => {
            generate_sequential(context, base_prompt, generator, combiner, strategy, run_id).await
        }
        ChainStrategy::Hierarchical => {
            generate_hierarchical(context, base_prompt, generator, combiner, strategy, run_id).await
        }
    }
}

/// Sequential batching: fill a batch while the next chunk still fits,
/// flush it as one generation call, continue. The tail of each batch is
/// repeated at the head of the next as cross-batch continuity.
async fn generate_sequential<G, C>(
    context: &ChunkedContext,
    base_prompt: &str,
    generator: &G,
    combiner: &C,
    strategy: &ChunkStrategy,
    run_id: String,
) -> Result<ChainOutcome, ChainError>
where
    G: Generator + ?Sized,
    C: Combiner + ?Sized,
{
    let base_tokens = estimate_tokens(base_prompt);
    let per_batch = strategy
        .max_tokens
        .saturating_sub(base_tokens + CHAIN_MARGIN_TOKENS + strategy.overlap_tokens);

    let batches = split_into_batches(&context.chunks, per_batch);
    let total = batches.len();

    info!(
        run_id = %run_id,
        generator = generator.name(),
        batches = total,
        total_tokens = context.total_tokens,
        "Sequential chained generation"
    );

    let mut results = Vec::with_capacity(total);
    let mut prompt_tokens = Vec::with_capacity(total);
    let mut previous_tail: Option<String> = None;

    for (index, batch) in batches.iter().enumerate() {
        let sections: String = batch.iter().map(|c| render_section(c)).collect();

        let mut prompt = format!("{base_prompt}\n\n[Context part {}/{}]", index + 1, total);
        if let Some(tail) = &previous_tail {
            prompt.push_str("\n\n[Continued from previous part]\n...");
            prompt.push_str(tail);
        }
        prompt.push_str(&sections);

        let tokens = estimate_tokens(&prompt);
        debug!(batch = index + 1, total, prompt_tokens = tokens, "Generating batch");

        let partial = generator.generate(&prompt).await?;
        results.push(partial);
        prompt_tokens.push(tokens);

        if strategy.overlap_tokens > 0 {
            previous_tail = Some(tail_chars(&sections, strategy.overlap_tokens * 4));
        }
    }

    let iterations = results.len();
    Ok(ChainOutcome {
        result: combiner.combine(results),
        strategy: PassStrategy::Sequential,
        iterations,
        run_id,
        prompt_tokens,
    })
}

/// Hierarchical two-phase generation: condense critical chunks into a
/// summary, then refine it with batches of the remaining detail.
async fn generate_hierarchical<G, C>(
    context: &ChunkedContext,
    base_prompt: &str,
    generator: &G,
    combiner: &C,
    strategy: &ChunkStrategy,
    run_id: String,
) -> Result<ChainOutcome, ChainError>
where
    G: Generator + ?Sized,
    C: Combiner + ?Sized,
{
    let (critical, normal): (Vec<&ContextChunk>, Vec<&ContextChunk>) = context
        .chunks
        .iter()
        .partition(|c| c.priority < CRITICAL_PRIORITY_CUTOFF);

    info!(
        run_id = %run_id,
        generator = generator.name(),
        critical = critical.len(),
        normal = normal.len(),
        "Hierarchical chained generation"
    );

    let mut results = Vec::new();
    let mut prompt_tokens = Vec::new();

    // ── Phase 1: condense critical context into a seed summary ──
    let mut summary = String::new();
    if !critical.is_empty() {
        let sections: String = critical.iter().map(|c| render_section(c)).collect();
        let prompt = format!(
            "{base_prompt}\n\nCondense the following critical context into a summary \
             that preserves every key fact, decision, and name:{sections}"
        );
        let tokens = estimate_tokens(&prompt);
        debug!(prompt_tokens = tokens, "Generating phase-1 summary");

        summary = generator.generate(&prompt).await?;
        results.push(summary.clone());
        prompt_tokens.push(tokens);
    }

    // ── Phase 2: refine with detail batches, budget reduced by the summary ──
    let base_tokens = estimate_tokens(base_prompt);
    let summary_tokens = estimate_tokens(&summary);
    let per_batch = strategy
        .max_tokens
        .saturating_sub(base_tokens + CHAIN_MARGIN_TOKENS + summary_tokens);

    for batch in split_into_batches_ref(&normal, per_batch) {
        let sections: String = batch.iter().map(|c| render_section(c)).collect();
        let prompt = if summary.is_empty() {
            format!("{base_prompt}{sections}")
        } else {
            format!(
                "{base_prompt}\n\nWorking summary so far:\n{summary}\n\n\
                 Refine and extend the summary by incorporating this additional \
                 context:{sections}"
            )
        };
        let tokens = estimate_tokens(&prompt);
        debug!(prompt_tokens = tokens, "Generating phase-2 refinement batch");

        let partial = generator.generate(&prompt).await?;
        results.push(partial);
        prompt_tokens.push(tokens);
    }

    let iterations = results.len();
    Ok(ChainOutcome {
        result: combiner.combine(results),
        strategy: PassStrategy::Hierarchical,
        iterations,
        run_id,
        prompt_tokens,
    })
}

/// Greedy batching: accumulate chunks while the next one still fits.
/// A chunk larger than the whole budget gets a batch of its own rather
/// than being dropped — chaining exists to include everything.
fn split_into_batches(chunks: &[ContextChunk], per_batch: usize) -> Vec<Vec<&ContextChunk>> {
    split_into_batches_ref(&chunks.iter().collect::<Vec<_>>(), per_batch)
}

fn split_into_batches_ref<'a>(
    chunks: &[&'a ContextChunk],
    per_batch: usize,
) -> Vec<Vec<&'a ContextChunk>> {
    let mut batches = Vec::new();
    let mut current: Vec<&ContextChunk> = Vec::new();
    let mut current_tokens = 0usize;

    for chunk in chunks {
        if !current.is_empty() && current_tokens + chunk.token_estimate > per_batch {
            batches.push(std::mem::take(&mut current));
            current_tokens = 0;
        }
        current.push(chunk);
        current_tokens += chunk.token_estimate;
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

/// Last `max_chars` of a string, respecting char boundaries.
fn tail_chars(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }
    let mut start = s.len() - max_chars;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    s[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::create_context_chunks;
    use colloquy_core::SectionJoinCombiner;
    use std::sync::Mutex;

    /// Records every prompt it receives; optionally fails on call N.
    struct ScriptedGenerator {
        prompts: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedGenerator {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on_call: Some(call),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn prompt(&self, call: usize) -> String {
            self.prompts.lock().unwrap()[call - 1].clone()
        }
    }

    #[async_trait::async_trait]
    impl Generator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            let call = prompts.len();
            if self.fail_on_call == Some(call) {
                return Err(GeneratorError::Network("connection reset".into()));
            }
            Ok(format!("part-{call}"))
        }
    }

    fn context_of(pairs: &[(&str, &str)], strategy: &ChunkStrategy) -> ChunkedContext {
        let blocks: Vec<(String, String)> = pairs
            .iter()
            .map(|(n, c)| (n.to_string(), c.to_string()))
            .collect();
        create_context_chunks(&blocks, strategy)
    }

    #[tokio::test]
    async fn fitting_context_runs_single_pass() {
        // 200_000 chars ≈ 50_000 tokens against a 120_000 budget.
        let strategy = ChunkStrategy::default();
        let ctx = context_of(&[("question_answers", &"q".repeat(200_000))], &strategy);
        assert!(!ctx.needs_chaining);

        let generator = ScriptedGenerator::new();
        let outcome = generate_with_chaining(
            &ctx,
            "Summarize the interviews.",
            &generator,
            &SectionJoinCombiner,
            &strategy,
        )
        .await
        .unwrap();

        assert_eq!(outcome.strategy, PassStrategy::SinglePass);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(generator.call_count(), 1);
        assert_eq!(outcome.result, "part-1");
        assert!(generator.prompt(1).contains("=== QUESTION ANSWERS ==="));
    }

    #[tokio::test]
    async fn sequential_batches_and_counts_iterations() {
        let strategy = ChunkStrategy {
            max_tokens: 5_000,
            overlap_tokens: 100,
            ..ChunkStrategy::default()
        };
        // Six 1_000-token chunks: 6_000 total > 5_000 budget.
        let body = "a".repeat(4_000);
        let ctx = context_of(
            &[
                ("project_summary", &body),
                ("custom_prompt", &body),
                ("question_answers", &body),
                ("stakeholder_profiles", &body),
                ("file_content", &body),
                ("questions_list", &body),
            ],
            &strategy,
        );
        assert!(ctx.needs_chaining);

        let generator = ScriptedGenerator::new();
        let outcome = generate_with_chaining(
            &ctx,
            "Analyze.",
            &generator,
            &SectionJoinCombiner,
            &strategy,
        )
        .await
        .unwrap();

        assert_eq!(outcome.strategy, PassStrategy::Sequential);
        assert!(generator.call_count() > 1);
        assert_eq!(outcome.iterations, generator.call_count());
        assert_eq!(outcome.prompt_tokens.len(), outcome.iterations);

        // Every partial made it into the combined result.
        for call in 1..=outcome.iterations {
            assert!(outcome.result.contains(&format!("part-{call}")));
        }

        // Part labels and continuity: first batch has no carry-over,
        // later batches repeat the previous tail.
        let first = generator.prompt(1);
        assert!(first.contains("[Context part 1/"));
        assert!(!first.contains("[Continued from previous part]"));
        let second = generator.prompt(2);
        assert!(second.contains("[Continued from previous part]"));
    }

    #[tokio::test]
    async fn sequential_iterations_match_batch_count_at_scale() {
        // Ten 30_000-token chunks ≈ 300_000 total against 120_000.
        let strategy = ChunkStrategy::default();
        let body = "b".repeat(120_000);
        let blocks: Vec<(String, String)> = (0..10)
            .map(|i| (format!("section_{i}"), body.clone()))
            .collect();
        let ctx = create_context_chunks(&blocks, &strategy);
        assert_eq!(ctx.total_tokens, 300_000);
        assert!(ctx.needs_chaining);

        let generator = ScriptedGenerator::new();
        let outcome = generate_with_chaining(
            &ctx,
            "Analyze.",
            &generator,
            &SectionJoinCombiner,
            &strategy,
        )
        .await
        .unwrap();

        assert!(generator.call_count() > 1);
        assert_eq!(outcome.iterations, generator.call_count());
    }

    #[tokio::test]
    async fn hierarchical_summarizes_then_refines() {
        let strategy = ChunkStrategy {
            max_tokens: 500,
            overlap_tokens: 0,
            ..ChunkStrategy::default()
        };
        let mut ctx = context_of(
            &[
                ("project_summary", &"p".repeat(1_200)), // priority 0: critical
                ("question_answers", &"q".repeat(800)),  // priority 3: normal
                ("file_content", &"f".repeat(600)),      // priority 5: normal
            ],
            &strategy,
        );
        assert!(ctx.needs_chaining);
        ctx.chain_strategy = Some(ChainStrategy::Hierarchical);

        let generator = ScriptedGenerator::new();
        let outcome = generate_with_chaining(
            &ctx,
            "Produce a findings report.",
            &generator,
            &SectionJoinCombiner,
            &strategy,
        )
        .await
        .unwrap();

        assert_eq!(outcome.strategy, PassStrategy::Hierarchical);
        // Phase 1 + one phase-2 batch per normal chunk (tiny budget).
        assert_eq!(outcome.iterations, 3);
        assert_eq!(generator.call_count(), 3);

        let phase1 = generator.prompt(1);
        assert!(phase1.contains("Condense the following critical context"));
        assert!(phase1.contains("=== PROJECT SUMMARY ==="));

        // Phase-2 prompts carry the phase-1 summary ("part-1").
        let phase2 = generator.prompt(2);
        assert!(phase2.contains("Working summary so far:\npart-1"));
        assert!(phase2.contains("=== QUESTION ANSWERS ==="));

        // Phase-1 result is part of the combined output.
        assert!(outcome.result.contains("part-1"));
        assert!(outcome.result.contains("part-3"));
    }

    #[tokio::test]
    async fn hierarchical_without_critical_chunks_skips_phase_one() {
        let strategy = ChunkStrategy {
            max_tokens: 300,
            overlap_tokens: 0,
            ..ChunkStrategy::default()
        };
        let mut ctx = context_of(
            &[
                ("question_answers", &"q".repeat(800)),
                ("file_content", &"f".repeat(600)),
            ],
            &strategy,
        );
        assert!(ctx.needs_chaining);
        ctx.chain_strategy = Some(ChainStrategy::Hierarchical);

        let generator = ScriptedGenerator::new();
        let outcome = generate_with_chaining(
            &ctx,
            "Report.",
            &generator,
            &SectionJoinCombiner,
            &strategy,
        )
        .await
        .unwrap();

        assert_eq!(outcome.iterations, 2);
        assert!(!generator.prompt(1).contains("Condense the following"));
        assert!(!generator.prompt(1).contains("Working summary"));
    }

    #[tokio::test]
    async fn generator_failure_aborts_the_whole_run() {
        let strategy = ChunkStrategy {
            max_tokens: 1_000,
            overlap_tokens: 0,
            ..ChunkStrategy::default()
        };
        let body = "c".repeat(2_400); // 600 tokens per chunk
        let ctx = context_of(
            &[
                ("project_summary", &body),
                ("question_answers", &body),
                ("file_content", &body),
            ],
            &strategy,
        );
        assert!(ctx.needs_chaining);

        let generator = ScriptedGenerator::failing_on(2);
        let err = generate_with_chaining(
            &ctx,
            "Analyze.",
            &generator,
            &SectionJoinCombiner,
            &strategy,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ChainError::Generator(_)));
        // Failed mid-sequence: the first call happened, nothing after the failure.
        assert_eq!(generator.call_count(), 2);
    }

    #[test]
    fn batching_gives_oversized_chunks_their_own_batch() {
        let strategy = ChunkStrategy::default();
        let ctx = context_of(
            &[
                ("project_summary", &"a".repeat(40)),  // 10 tokens
                ("question_answers", &"b".repeat(400)), // 100 tokens, over budget
                ("file_content", &"c".repeat(40)),      // 10 tokens
            ],
            &strategy,
        );
        let batches = split_into_batches(&ctx.chunks, 50);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[1].len(), 1);
        assert_eq!(batches[1][0].kind, "question_answers");
    }

    #[test]
    fn tail_chars_respects_char_boundaries() {
        assert_eq!(tail_chars("hello", 10), "hello");
        assert_eq!(tail_chars("hello world", 5), "world");
        // Multi-byte: é is two bytes; never split inside it.
        let s = "aéééé";
        let tail = tail_chars(s, 3);
        assert!(s.ends_with(&tail));
        assert!(tail.len() <= 3 || tail.chars().count() >= 1);
    }
}
