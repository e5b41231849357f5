//! CLI command definitions.

use crate::cli::RateLimitOptions;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ecocycle - recycling advice for detected waste items
#[derive(Parser, Debug)]
#[command(name = "ecocycle")]
#[command(about = "Classify detected waste items and ask for rate-limited recycling advice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask for recycling advice about detected items
    Advise {
        /// Question to ask
        question: String,

        /// Detected item labels (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<String>,

        /// JSON file of detections or recorded items to use as context
        #[arg(short, long)]
        detections: Option<PathBuf>,

        #[command(flatten)]
        limits: RateLimitOptions,
    },

    /// Show the waste category of each label
    Classify {
        /// Item labels to classify
        #[arg(required = true)]
        labels: Vec<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Generate a disposal guide for one item type
    Guide {
        /// Item type (e.g., "laptop")
        item: String,

        #[command(flatten)]
        limits: RateLimitOptions,
    },

    /// Analyze the last week of recorded items
    Analyze {
        /// JSON file of detections or recorded items
        detections: PathBuf,

        #[command(flatten)]
        limits: RateLimitOptions,
    },

    /// Show category statistics, recommendations and tips
    Insights {
        /// JSON file of detections or recorded items
        detections: PathBuf,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config {
        /// Output format (human prints TOML)
        #[arg(long, default_value = "human")]
        format: OutputFormat,

        #[command(flatten)]
        limits: RateLimitOptions,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
