//! Context-window management — the core of Colloquy.
//!
//! A generation request flows through three stages:
//!
//! 1. **Chunking** ([`create_context_chunks`]): named text blocks are tagged
//!    with a priority rank, token-estimated, and sorted.
//! 2. **Fit-to-limit assembly** ([`build_prompt_within_limit`]): chunks are
//!    greedily appended in priority order until the token budget runs out;
//!    whatever does not fit is recorded as dropped.
//! 3. **Chained generation** ([`generate_with_chaining`]): when the full
//!    context exceeds the window, it is split into batches and generated in
//!    multiple passes (sequential or hierarchical), combining the partial
//!    results.
//!
//! All token arithmetic uses the chars/4 heuristic in [`token`] — an
//! accepted approximation, not a real tokenizer.

pub mod assembler;
pub mod chain;
pub mod chunker;
pub mod token;

pub use assembler::{build_prompt_within_limit, FittedPrompt};
pub use chain::{generate_with_chaining, ChainError, ChainOutcome, PassStrategy};
pub use chunker::{
    create_context_chunks, ChainStrategy, ChunkStrategy, ChunkedContext, ContextChunk,
};
pub use token::estimate_tokens;
