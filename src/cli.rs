//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// freethrow - free-throw arm-alignment analysis and plane animation
#[derive(Parser, Debug)]
#[command(name = "freethrow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize deviation statistics for every trial of a participant
    Summarize {
        /// Base directory holding one sub-directory per participant
        #[arg(short, long, default_value = "data")]
        base: PathBuf,

        /// Participant identifier (sub-directory name)
        #[arg(short, long)]
        participant: String,
    },

    /// Drive the skeleton/plane animation for one trial file
    Animate {
        /// Trial JSON file
        trial: PathBuf,

        /// Animation config (JSON); defaults apply to omitted fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame stream output (JSON lines)
        #[arg(short, long, default_value = "frames.jsonl")]
        output: PathBuf,

        /// Run the driver against an in-memory scene only
        #[arg(long)]
        dry_run: bool,
    },
}
