//! Fit-to-limit prompt assembly.
//!
//! Greedy and priority-faithful: chunks are placed strictly in priority
//! order with no reordering or backtracking to better fill the remaining
//! budget. Priority order carries meaning (the project summary must appear
//! before less-critical file content), so a knapsack-style fit would be
//! wrong here even though it packs tighter.

use tracing::warn;

use crate::chunker::{ChunkedContext, ContextChunk};
use crate::token::estimate_tokens;

/// Tokens held back from the budget to absorb estimation error.
const SAFETY_MARGIN_TOKENS: usize = 1_000;

/// The result of fitting chunks under a token budget.
#[derive(Debug, Clone)]
pub struct FittedPrompt {
    /// Base prompt plus every chunk section that fit.
    pub prompt: String,

    /// Chunk kinds that made it in, in processed order.
    pub used_chunks: Vec<String>,

    /// Chunk kinds that did not fit, in processed order.
    pub dropped_chunks: Vec<String>,
}

/// Render the visible section header for a chunk.
pub(crate) fn section_header(kind: &str) -> String {
    let label: String = kind
        .chars()
        .map(|c| if c == '_' { ' ' } else { c.to_ascii_uppercase() })
        .collect();
    format!("=== {} ===", label)
}

/// Render one chunk as an appendable prompt section.
pub(crate) fn render_section(chunk: &ContextChunk) -> String {
    format!("\n\n{}\n{}", section_header(&chunk.kind), chunk.content)
}

/// Greedily append chunks (in priority order) to `base_prompt` until the
/// token budget is exhausted.
///
/// Reserves room for the base prompt plus a fixed safety margin. A chunk
/// that does not fit is recorded as dropped and the walk continues — later,
/// smaller chunks may still fit. The returned prompt's estimated token
/// count never exceeds `max_tokens`.
pub fn build_prompt_within_limit(
    context: &ChunkedContext,
    base_prompt: &str,
    max_tokens: usize,
) -> FittedPrompt {
    let base_tokens = estimate_tokens(base_prompt);
    let mut remaining = max_tokens.saturating_sub(base_tokens + SAFETY_MARGIN_TOKENS);

    let mut prompt = base_prompt.to_string();
    let mut used_chunks = Vec::new();
    let mut dropped_chunks = Vec::new();

    for chunk in &context.chunks {
        let section = render_section(chunk);
        let section_tokens = estimate_tokens(&section);

        if section_tokens <= remaining {
            prompt.push_str(&section);
            remaining -= section_tokens;
            used_chunks.push(chunk.kind.clone());
        } else {
            warn!(
                kind = %chunk.kind,
                chunk_tokens = chunk.token_estimate,
                remaining,
                "Dropping context chunk: over token budget"
            );
            dropped_chunks.push(chunk.kind.clone());
        }
    }

    FittedPrompt {
        prompt,
        used_chunks,
        dropped_chunks,
    }
}
