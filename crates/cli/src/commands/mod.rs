//! CLI subcommand implementations.

use std::path::Path;

use colloquy_config::ChunkingConfig;
use colloquy_context::ChunkStrategy;
use colloquy_prompts::ProjectData;

pub mod context;
pub mod estimate;
pub mod generate;

/// Map the chunking config onto a chunk strategy, keeping the built-in
/// priority order unless the config names its own.
pub(crate) fn chunk_strategy(config: &ChunkingConfig) -> ChunkStrategy {
    let mut strategy = ChunkStrategy {
        max_tokens: config.max_tokens,
        overlap_tokens: config.overlap_tokens,
        ..ChunkStrategy::default()
    };
    if !config.priority_order.is_empty() {
        strategy.priority_order = config.priority_order.clone();
    }
    strategy
}

/// Read and deserialize a project data JSON file.
pub(crate) fn load_project_data(path: &Path) -> Result<ProjectData, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let data: ProjectData = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(data)
}
