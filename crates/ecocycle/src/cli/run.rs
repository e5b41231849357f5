//! Command handlers.

use crate::cli::{OutputFormat, RateLimitOptions, load_detections};
use chrono::{DateTime, Utc};
use ecocycle_advice::{AdviceGateway, analyze_waste_habits, disposal_guide};
use ecocycle_core::{
    CategoryStat, ChatMessage, Recommendation, WasteCategory, WasteStore, category_breakdown,
    category_stats, classify, recommendations, recycling_tips,
};
use ecocycle_error::{AdviceError, ConfigError, EcocycleResult, InputError};
use ecocycle_rate_limit::EcocycleConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument};

/// Shown to the user whenever an advice request fails.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Load configuration and apply CLI overrides.
///
/// With `path`, the file is layered over the bundled defaults; otherwise the
/// usual home and working directory files are consulted.
pub fn load_config(
    path: Option<&Path>,
    limits: &RateLimitOptions,
) -> EcocycleResult<EcocycleConfig> {
    let base = match path {
        Some(path) => EcocycleConfig::from_file(path)?,
        None => EcocycleConfig::load()?,
    };
    let config = limits.apply_to_config(base);
    config.gateway.validate()?;
    Ok(config)
}

/// Start a gateway backed by the configured provider.
#[cfg(feature = "gemini")]
pub fn build_gateway(config: &EcocycleConfig) -> EcocycleResult<AdviceGateway> {
    use std::sync::Arc;

    let provider = ecocycle_models::GeminiProvider::from_config(&config.provider)?;
    AdviceGateway::spawn(Arc::new(provider), config)
}

/// Start a gateway backed by the configured provider.
#[cfg(not(feature = "gemini"))]
pub fn build_gateway(_config: &EcocycleConfig) -> EcocycleResult<AdviceGateway> {
    Err(ConfigError::new("No advice provider compiled in; rebuild with the `gemini` feature").into())
}

/// The apology line followed by what went wrong.
pub fn apology(err: &AdviceError) -> String {
    format!("{}\n{}", APOLOGY, err.user_message())
}

/// Ask one question about the detected items and print the answer.
#[instrument(skip_all, fields(labels = labels.len()))]
pub async fn advise(
    config: &EcocycleConfig,
    question: &str,
    labels: &[String],
    detections: Option<&Path>,
) -> EcocycleResult<()> {
    let mut store = match detections {
        Some(path) => load_detections(path, Utc::now())?,
        None => WasteStore::new(),
    };
    let context = merge_labels(store.context_labels(), labels);
    let gateway = build_gateway(config)?;

    store.add_chat_message(ChatMessage::user(question));
    let result = gateway.request_advice(question, &context).await;
    match result {
        Ok(answer) => {
            println!("{}", answer);
            store.add_chat_message(ChatMessage::assistant(answer));
            info!(messages = store.chat_history().len(), "Advice delivered");
            Ok(())
        }
        Err(e) => {
            let reply = apology(&e);
            eprintln!("{}", reply);
            store.add_chat_message(ChatMessage::assistant(reply));
            Err(e.into())
        }
    }
}

/// Stored labels first, then any extra labels not already present.
pub fn merge_labels(mut context: Vec<String>, extra: &[String]) -> Vec<String> {
    for label in extra {
        let label = label.trim();
        if !label.is_empty() && !context.iter().any(|l| l == label) {
            context.push(label.to_string());
        }
    }
    context
}

/// One classified label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Label as given
    pub label: String,
    /// Category it maps to
    pub category: WasteCategory,
    /// Disposal tip for the category
    pub tip: &'static str,
}

/// Classify each label.
pub fn classify_labels(labels: &[String]) -> Vec<Classification> {
    labels
        .iter()
        .map(|label| {
            let category = classify(label);
            Classification {
                label: label.clone(),
                category,
                tip: category.tip(),
            }
        })
        .collect()
}

/// Render classifications for printing.
pub fn render_classifications(
    classifications: &[Classification],
    format: OutputFormat,
) -> EcocycleResult<String> {
    match format {
        OutputFormat::Json => to_json(classifications),
        OutputFormat::Human => Ok(classifications
            .iter()
            .map(|c| format!("{}: {} ({})", c.label, c.category, c.tip))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Generate and print a disposal guide. Falls back to a fixed sentence on failure.
pub async fn guide(config: &EcocycleConfig, item: &str) -> EcocycleResult<()> {
    let gateway = build_gateway(config)?;
    println!("{}", disposal_guide(&gateway, item).await);
    Ok(())
}

/// Analyze the last week of items from a detections file.
pub async fn analyze(config: &EcocycleConfig, detections: &Path) -> EcocycleResult<()> {
    let now = Utc::now();
    let store = load_detections(detections, now)?;
    let gateway = build_gateway(config)?;
    println!(
        "{}",
        analyze_waste_habits(&gateway, store.detected_items(), now).await
    );
    Ok(())
}

/// Everything the insights view shows for a session.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsReport {
    /// Per-category statistics
    pub stats: Vec<CategoryStat>,
    /// Item counts by category, including `other`
    pub breakdown: BTreeMap<WasteCategory, usize>,
    /// Recommendations for the last seven days
    pub recommendations: Vec<Recommendation>,
    /// Tips for the most recent items
    pub tips: Vec<&'static str>,
}

impl InsightsReport {
    /// Aggregate a session's items as of `now`.
    pub fn from_store(store: &WasteStore, now: DateTime<Utc>) -> Self {
        let items = store.detected_items();
        Self {
            stats: category_stats(items),
            breakdown: category_breakdown(items),
            recommendations: recommendations(items, now),
            tips: recycling_tips(items),
        }
    }

    /// Render the report for printing.
    pub fn render(&self, format: OutputFormat) -> EcocycleResult<String> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Human => Ok(self.render_human()),
        }
    }

    fn render_human(&self) -> String {
        let mut lines = vec!["Categories".to_string()];
        for stat in &self.stats {
            let mut line = format!("  {}: {} items", stat.category, stat.count);
            if !stat.items.is_empty() {
                line.push_str(&format!(" ({})", stat.items.join(", ")));
            }
            line.push_str(&format!(" - {}", stat.tip));
            lines.push(line);
        }

        if !self.recommendations.is_empty() {
            lines.push("Recommendations".to_string());
            for rec in &self.recommendations {
                lines.push(format!("  {}: {}", rec.title, rec.message));
            }
        }

        if !self.tips.is_empty() {
            lines.push("Tips".to_string());
            for tip in &self.tips {
                lines.push(format!("  - {}", tip));
            }
        }
        lines.join("\n")
    }
}

/// Print insights for a detections file.
pub fn insights(detections: &Path, format: OutputFormat) -> EcocycleResult<()> {
    let now = Utc::now();
    let store = load_detections(detections, now)?;
    println!("{}", InsightsReport::from_store(&store, now).render(format)?);
    Ok(())
}

/// Render the effective configuration.
pub fn render_config(config: &EcocycleConfig, format: OutputFormat) -> EcocycleResult<String> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Human => toml::to_string_pretty(config)
            .map_err(|e| ConfigError::new(format!("Failed to serialize configuration: {}", e)).into()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> EcocycleResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| InputError::new(format!("Failed to serialize output: {}", e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_skips_duplicates_and_blanks() {
        let merged = merge_labels(
            vec!["cup".to_string()],
            &["cup".to_string(), " ".to_string(), "laptop".to_string()],
        );
        assert_eq!(merged, vec!["cup".to_string(), "laptop".to_string()]);
    }

    #[test]
    fn apology_includes_reason() {
        let err = AdviceError::new(ecocycle_error::AdviceErrorKind::RateLimited { wait_secs: 12 });
        let text = apology(&err);
        assert!(text.starts_with(APOLOGY));
        assert!(text.contains("12 seconds"));
    }
}
