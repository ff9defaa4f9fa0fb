//! Colloquy CLI — the main entry point.
//!
//! Commands:
//! - `context`  — Inspect the assembled context and its chunks
//! - `generate` — Run document generation end to end
//! - `estimate` — Print the token estimate for a file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "colloquy",
    about = "Colloquy — stakeholder-interview context engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the assembled context, chunk statistics, and budget fit
    Context {
        /// Project data JSON file
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Generate a structured document from the project data
    Generate {
        /// Project data JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Prompt template file with {{placeholders}}
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Instructions for the document when no template is given
        #[arg(
            short,
            long,
            default_value = "Generate a findings report from the stakeholder interviews."
        )]
        instructions: String,

        /// Write the parsed document JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the token estimate for a text file
    Estimate {
        /// File to estimate
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Context { data } => commands::context::run(&data).await?,
        Commands::Generate {
            data,
            template,
            instructions,
            output,
        } => commands::generate::run(&data, template.as_deref(), &instructions, output.as_deref()).await?,
        Commands::Estimate { file } => commands::estimate::run(&file)?,
    }

    Ok(())
}
