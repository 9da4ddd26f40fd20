//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Show Organizer - Put your TV show folders in media-server order
#[derive(Parser, Debug)]
#[command(name = "show-organizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an organization plan without moving anything
    Plan {
        /// Directory with one subdirectory per show
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory the organized shows go into
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Where to write plan.json (default: OUTPUT/plan_<timestamp>.json)
        #[arg(short, long, value_name = "PLAN_FILE")]
        output_file: Option<PathBuf>,
    },

    /// Plan and move files in one go
    Organize {
        /// Directory with one subdirectory per show
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory the organized shows go into
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Execute a plan file
    Execute {
        /// Path to the plan.json file
        #[arg(value_name = "PLAN_FILE")]
        plan_file: PathBuf,
    },
}
