//! `colloquy estimate` — Token estimate for a text file.

use std::path::Path;

use colloquy_context::estimate_tokens;

pub fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    println!("{}", file.display());
    println!("  characters: {}", content.len());
    println!("  tokens:     ~{}", estimate_tokens(&content));

    Ok(())
}
