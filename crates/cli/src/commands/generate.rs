//! `colloquy generate` — End-to-end structured document generation.

use std::path::Path;

use colloquy_config::AppConfig;
use colloquy_context::{create_context_chunks, generate_with_chaining};
use colloquy_core::SectionJoinCombiner;
use colloquy_prompts::{
    build_context, build_structured_prompt, context_blocks, parse_document,
    substitute_placeholders,
};
use colloquy_providers::OpenAiCompatGenerator;
use tracing::{info, warn};

use super::{chunk_strategy, load_project_data};

pub async fn run(
    data_path: &Path,
    template: Option<&Path>,
    instructions: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    if !config.has_api_key() && config.provider != "ollama" {
        return Err("No API key configured. Set COLLOQUY_API_KEY or add api_key to ~/.colloquy/config.toml".into());
    }

    let strategy = chunk_strategy(&config.chunking);
    let generator = build_generator(&config);

    let data = load_project_data(data_path)?;
    let ctx = build_context(&data);

    let instruction_text = match template {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            substitute_placeholders(&raw, &ctx)
        }
        None => instructions.to_string(),
    };
    let base_prompt = build_structured_prompt(&instruction_text);

    let blocks = context_blocks(&ctx);
    let chunked = create_context_chunks(&blocks, &strategy);

    info!(
        total_tokens = chunked.total_tokens,
        needs_chaining = chunked.needs_chaining,
        model = %config.model,
        "Starting document generation"
    );

    let outcome = generate_with_chaining(
        &chunked,
        &base_prompt,
        &generator,
        &SectionJoinCombiner,
        &strategy,
    )
    .await?;

    println!("Generation complete");
    println!("  run:        {}", outcome.run_id);
    println!("  strategy:   {}", outcome.strategy);
    println!("  iterations: {}", outcome.iterations);
    println!();

    let rendered = match parse_document(&outcome.result) {
        Ok(document) => {
            println!("Parsed document: {}", document.title);
            serde_json::to_string_pretty(&document)?
        }
        Err(e) => {
            warn!(error = %e, "Result is not a single structured document, keeping raw text");
            outcome.result.clone()
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Pick the generator implementation for the configured provider.
fn build_generator(config: &AppConfig) -> OpenAiCompatGenerator {
    let api_key = config.api_key.clone().unwrap_or_default();
    let model = config.model.clone();

    match (&config.base_url, config.provider.as_str()) {
        (Some(url), _) => {
            OpenAiCompatGenerator::new(config.provider.clone(), url.clone(), api_key, model)
        }
        (None, "openrouter") => OpenAiCompatGenerator::openrouter(api_key, model),
        (None, "ollama") => OpenAiCompatGenerator::ollama(None, model),
        (None, _) => OpenAiCompatGenerator::openai(api_key, model),
    }
}
