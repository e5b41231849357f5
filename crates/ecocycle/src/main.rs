//! Ecocycle CLI binary.
//!
//! This binary provides command-line access to Ecocycle's functionality:
//! - Classify detector labels into waste categories
//! - Summarize a session's detections
//! - Ask for recycling advice through the rate-governed gateway

use clap::Parser;
use ecocycle::cli::{self, Cli, Commands};
use ecocycle::{LoggingConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before anything reads the API key
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&LoggingConfig::new(cli.verbose).with_json_logs(cli.json_logs))?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Advise {
            question,
            labels,
            detections,
            limits,
        } => {
            let config = cli::load_config(config_path, &limits)?;
            cli::advise(&config, &question, &labels, detections.as_deref()).await?;
        }

        Commands::Classify { labels, format } => {
            let classified = cli::classify_labels(&labels);
            println!("{}", cli::render_classifications(&classified, format)?);
        }

        Commands::Guide { item, limits } => {
            let config = cli::load_config(config_path, &limits)?;
            cli::guide(&config, &item).await?;
        }

        Commands::Analyze { detections, limits } => {
            let config = cli::load_config(config_path, &limits)?;
            cli::analyze(&config, &detections).await?;
        }

        Commands::Insights { detections, format } => {
            cli::insights(&detections, format)?;
        }

        Commands::Config { format, limits } => {
            let config = cli::load_config(config_path, &limits)?;
            println!("{}", cli::render_config(&config, format)?);
        }
    }

    Ok(())
}
