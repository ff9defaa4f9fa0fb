//! Chunk building — tags named text blocks with priorities and token
//! estimates, producing a [`ChunkedContext`] ready for assembly or chaining.

use serde::{Deserialize, Serialize};

use crate::token::estimate_tokens;

/// Priority assigned to blocks whose name is not in the strategy's
/// priority order. Sorts after every known section.
pub const UNKNOWN_PRIORITY: usize = 999;

/// Chaining strategy for contexts that exceed the token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainStrategy {
    /// Batch chunks in priority order and generate once per batch.
    Sequential,
    /// Summarize critical chunks first, then refine with detail batches.
    Hierarchical,
}

/// Configuration for chunk building and chaining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkStrategy {
    /// Token budget for a single generation call's context window.
    pub max_tokens: usize,

    /// Tokens of cross-batch continuity: the tail of each sequential batch
    /// is repeated at the head of the next.
    pub overlap_tokens: usize,

    /// Known section names, most important first. Index = priority rank.
    pub priority_order: Vec<String>,
}

impl Default for ChunkStrategy {
    fn default() -> Self {
        Self {
            max_tokens: 120_000,
            overlap_tokens: 2_000,
            priority_order: [
                "project_summary",
                "custom_prompt",
                "template_prompt",
                "question_answers",
                "stakeholder_profiles",
                "file_content",
                "questions_list",
                "metadata",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ChunkStrategy {
    /// The priority rank for a section name, or [`UNKNOWN_PRIORITY`].
    pub fn priority_of(&self, name: &str) -> usize {
        self.priority_order
            .iter()
            .position(|k| k == name)
            .unwrap_or(UNKNOWN_PRIORITY)
    }
}

/// One named, prioritized, token-estimated block of context text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextChunk {
    /// Priority rank: lower sorts earlier. Unknown sections get 999.
    pub priority: usize,

    /// The section name this chunk came from (e.g. `question_answers`).
    pub kind: String,

    pub content: String,

    /// `ceil(content.len() / 4)`.
    pub token_estimate: usize,

    /// Provenance details (currently the block's original input index).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// The chunked form of a full generation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkedContext {
    /// Chunks sorted ascending by priority; ties keep input order.
    pub chunks: Vec<ContextChunk>,

    /// Sum of every chunk's token estimate.
    pub total_tokens: usize,

    /// True iff `total_tokens > strategy.max_tokens`.
    pub needs_chaining: bool,

    /// Set to `Sequential` when chaining is needed; callers may override
    /// to `Hierarchical` before generating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_strategy: Option<ChainStrategy>,
}

/// Build a [`ChunkedContext`] from ordered `(name, content)` blocks.
///
/// Blocks that are empty or whitespace-only are skipped. Each retained
/// block becomes one chunk tagged with its priority rank from the
/// strategy's ordering; the final list is stably sorted by priority.
pub fn create_context_chunks(blocks: &[(String, String)], strategy: &ChunkStrategy) -> ChunkedContext {
    let mut chunks: Vec<ContextChunk> = Vec::new();
    let mut total_tokens = 0usize;

    for (index, (name, content)) in blocks.iter().enumerate() {
        if content.trim().is_empty() {
            continue;
        }

        let token_estimate = estimate_tokens(content);
        total_tokens += token_estimate;

        let mut metadata = serde_json::Map::new();
        metadata.insert("input_index".into(), serde_json::json!(index));

        chunks.push(ContextChunk {
            priority: strategy.priority_of(name),
            kind: name.clone(),
            content: content.clone(),
            token_estimate,
            metadata,
        });
    }

    // Stable: equal priorities keep their input order.
    chunks.sort_by_key(|c| c.priority);

    let needs_chaining = total_tokens > strategy.max_tokens;

    tracing::debug!(
        chunks = chunks.len(),
        total_tokens,
        needs_chaining,
        "Built context chunks"
    );

    ChunkedContext {
        chunks,
        total_tokens,
        needs_chaining,
        chain_strategy: needs_chaining.then_some(ChainStrategy::Sequential),
    }
}
