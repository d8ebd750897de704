//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "episode-renamer",
    about = "Rename episode files to canonical names from local metadata",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan a library, classify files and write a rename plan
    Plan {
        /// Library directory to scan
        source: PathBuf,

        /// Episode metadata JSON file
        #[arg(short, long)]
        metadata: PathBuf,

        /// Plan output path (default: plan.json in the library directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Execute a previously written plan
    Execute {
        /// Plan file produced by the plan command
        plan_file: PathBuf,

        /// Walk the full execution path without changing anything
        #[arg(long)]
        dry_run: bool,
    },
}
