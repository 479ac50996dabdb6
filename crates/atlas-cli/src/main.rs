//! Org Atlas
//!
//! Derives a browsable topic/language hierarchy from a GitHub
//! organization's repositories.
//!
//! # Usage
//!
//! ```bash
//! atlas fetch --org acme [--include-forks] [--include-archived]
//! atlas build [--input repos.json] [--output hierarchy.json]
//! atlas stats [--input repos.json]
//! atlas run --org acme [--skip-fetch]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/org-atlas/config.toml)
//! 3. Environment variables (ATLAS_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use atlas_cli::{
    commands::{handle_build, handle_fetch, handle_run, handle_stats, init_logging, load_settings},
    Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    match cli.command {
        Commands::Fetch {
            org,
            output,
            include_forks,
            include_archived,
            token,
        } => {
            handle_fetch(&settings, org, output, include_forks, include_archived, token).await?;
        }
        Commands::Build { input, output } => {
            handle_build(&settings, input, output)?;
        }
        Commands::Stats { input } => {
            handle_stats(&settings, input)?;
        }
        Commands::Run {
            org,
            data_dir,
            skip_fetch,
            include_forks,
            include_archived,
            token,
        } => {
            handle_run(
                &settings,
                org,
                data_dir,
                skip_fetch,
                include_forks,
                include_archived,
                token,
            )
            .await?;
        }
    }

    Ok(())
}
