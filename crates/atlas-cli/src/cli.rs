//! CLI argument parsing for the atlas binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Org Atlas
///
/// Derives a browsable topic/language hierarchy from a GitHub
/// organization's repositories.
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/org-atlas/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Atlas commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch an organization's repositories into a snapshot file
    Fetch {
        /// GitHub organization name (falls back to config)
        #[arg(short, long)]
        org: Option<String>,

        /// Snapshot output path (default: <data_dir>/repos.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Include forked repositories
        #[arg(long)]
        include_forks: bool,

        /// Include archived repositories
        #[arg(long)]
        include_archived: bool,

        /// GitHub token (default: GITHUB_TOKEN env var)
        #[arg(long)]
        token: Option<String>,
    },

    /// Build the hierarchy from a snapshot file
    Build {
        /// Snapshot input path (default: <data_dir>/repos.json)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Hierarchy output path (default: <data_dir>/hierarchy.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print summary statistics and classification breakdown
    Stats {
        /// Snapshot input path (default: <data_dir>/repos.json)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Fetch then build in one go
    Run {
        /// GitHub organization name (falls back to config)
        #[arg(short, long)]
        org: Option<String>,

        /// Data directory for snapshot and hierarchy files
        #[arg(long)]
        data_dir: Option<String>,

        /// Reuse an existing snapshot instead of fetching
        #[arg(long)]
        skip_fetch: bool,

        /// Include forked repositories
        #[arg(long)]
        include_forks: bool,

        /// Include archived repositories
        #[arg(long)]
        include_archived: bool,

        /// GitHub token (default: GITHUB_TOKEN env var)
        #[arg(long)]
        token: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_fetch_with_org() {
        let cli = Cli::parse_from(["atlas", "fetch", "--org", "acme"]);
        match cli.command {
            Commands::Fetch { org, .. } => assert_eq!(org, Some("acme".to_string())),
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_cli_fetch_flags() {
        let cli = Cli::parse_from(["atlas", "fetch", "-o", "acme", "--include-forks"]);
        match cli.command {
            Commands::Fetch {
                include_forks,
                include_archived,
                ..
            } => {
                assert!(include_forks);
                assert!(!include_archived);
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_cli_build_paths() {
        let cli = Cli::parse_from(["atlas", "build", "--input", "in.json", "--output", "out.json"]);
        match cli.command {
            Commands::Build { input, output } => {
                assert_eq!(input, Some(PathBuf::from("in.json")));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_stats_defaults() {
        let cli = Cli::parse_from(["atlas", "stats"]);
        match cli.command {
            Commands::Stats { input } => assert!(input.is_none()),
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_cli_run_skip_fetch() {
        let cli = Cli::parse_from(["atlas", "run", "-o", "acme", "--skip-fetch"]);
        match cli.command {
            Commands::Run { org, skip_fetch, .. } => {
                assert_eq!(org, Some("acme".to_string()));
                assert!(skip_fetch);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["atlas", "--config", "/path/to/config.toml", "stats"]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
    }

    #[test]
    fn test_cli_with_log_level() {
        let cli = Cli::parse_from(["atlas", "--log-level", "debug", "stats"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }
}
