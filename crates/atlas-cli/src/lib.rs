//! Atlas CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (fetch, build, stats, run)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{handle_build, handle_fetch, handle_run, handle_stats};
