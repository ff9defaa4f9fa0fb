//! `colloquy context` — Inspect the assembled context and its chunks.

use std::path::Path;

use colloquy_config::AppConfig;
use colloquy_context::{build_prompt_within_limit, create_context_chunks};
use colloquy_prompts::{build_context, context_blocks};

use super::{chunk_strategy, load_project_data};

pub async fn run(data_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let strategy = chunk_strategy(&config.chunking);

    let data = load_project_data(data_path)?;
    let ctx = build_context(&data);
    let blocks = context_blocks(&ctx);
    let chunked = create_context_chunks(&blocks, &strategy);

    println!("Context for {}", ctx.project_name);
    println!("================================\n");

    println!("Chunks ({}):", chunked.chunks.len());
    for chunk in &chunked.chunks {
        println!(
            "  [{:>3}] {:<22} {:>8} tokens",
            chunk.priority, chunk.kind, chunk.token_estimate
        );
    }
    println!();
    println!("Total tokens:   {}", chunked.total_tokens);
    println!("Budget:         {}", strategy.max_tokens);
    println!("Needs chaining: {}", chunked.needs_chaining);
    if let Some(chain) = chunked.chain_strategy {
        println!("Chain strategy: {chain:?}");
    }

    let fitted = build_prompt_within_limit(&chunked, "", strategy.max_tokens);
    println!();
    println!("Single-prompt fit:");
    println!("  used:    {}", fitted.used_chunks.join(", "));
    if fitted.dropped_chunks.is_empty() {
        println!("  dropped: (none)");
    } else {
        println!("  dropped: {}", fitted.dropped_chunks.join(", "));
    }

    Ok(())
}
