//! CLI parse: clap types for reelweek. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reelweek - plan a week of short-form content
#[derive(Parser, Debug)]
#[command(name = "reelweek")]
#[command(about = "Generate a week of reel ideas or social posts with an LLM backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the user config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one reel idea per day of the week
    Ideas {
        /// Niche or topic the week is about
        #[arg(long)]
        niche: String,
        /// Optional series name woven into every idea
        #[arg(long)]
        series: Option<String>,
        /// Tone preset (e.g. casual, witty) or a free-text description
        #[arg(long)]
        tone: Option<String>,
        /// Also expand every generated idea into a full script
        #[arg(long)]
        scripts: bool,
        /// Print saved-day records as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Write one text file per expanded reel into this directory (needs --scripts)
        #[arg(long, requires = "scripts")]
        export_dir: Option<PathBuf>,
    },
    /// Generate a full week of social posts in one call
    Posts {
        /// Topic the posts are about
        #[arg(long)]
        topic: String,
        /// Post strategy (e.g. "Educational", "Thought Leadership")
        #[arg(long)]
        strategy: Option<String>,
        /// Posts per day (1-5)
        #[arg(long)]
        per_day: Option<usize>,
        /// Tone preset or free-text description
        #[arg(long)]
        tone: Option<String>,
    },
}
