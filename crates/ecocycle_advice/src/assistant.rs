//! Higher-level advice operations built on the gateway.
//!
//! Both operations queue through the same gateway as chat advice, so they
//! share its request and token budgets. They never fail: any error becomes
//! a fixed fallback sentence.

use crate::{AdviceGateway, disposal_guide_prompt, waste_habits_prompt};
use chrono::{DateTime, Utc};
use ecocycle_core::{WasteItem, recent_items};
use tracing::{instrument, warn};

/// Returned by [`analyze_waste_habits`] when the provider call fails.
pub const HABITS_FALLBACK: &str = "Unable to analyze waste habits at this time.";

/// Returned by [`disposal_guide`] when the provider call fails.
pub const DISPOSAL_GUIDE_FALLBACK: &str = "Unable to generate disposal guide at this time.";

/// Ask for an analysis of the last seven days of detections.
#[instrument(skip(gateway, items), fields(items = items.len()))]
pub async fn analyze_waste_habits(
    gateway: &AdviceGateway,
    items: &[WasteItem],
    now: DateTime<Utc>,
) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in recent_items(items, now) {
        match counts.iter_mut().find(|(label, _)| *label == item.item_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.item_type.clone(), 1)),
        }
    }

    match gateway.submit(waste_habits_prompt(&counts)).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Waste habit analysis failed");
            HABITS_FALLBACK.to_string()
        }
    }
}

/// Ask for a sectioned disposal guide for one item type.
#[instrument(skip(gateway))]
pub async fn disposal_guide(gateway: &AdviceGateway, item_type: &str) -> String {
    if item_type.trim().is_empty() {
        return DISPOSAL_GUIDE_FALLBACK.to_string();
    }
    match gateway.submit(disposal_guide_prompt(item_type.trim())).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Disposal guide request failed");
            DISPOSAL_GUIDE_FALLBACK.to_string()
        }
    }
}
