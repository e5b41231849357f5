//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the ecocycle binary.

mod commands;
mod input;
mod options;
mod run;

pub use commands::{Cli, Commands, OutputFormat};
pub use input::{load_detections, parse_detections};
pub use options::RateLimitOptions;
pub use run::{
    APOLOGY, Classification, InsightsReport, advise, analyze, apology, build_gateway,
    classify_labels, guide, insights, load_config, merge_labels, render_classifications,
    render_config,
};
