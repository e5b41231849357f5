//! Aggregations over detected items.

use crate::{WasteCategory, WasteItem};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category summary of the session's detections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    /// Category summarised
    pub category: WasteCategory,
    /// Number of items detected
    pub count: usize,
    /// Distinct item labels, in first-seen order
    pub items: Vec<String>,
    /// Most recent detection, if any
    pub last_detected: Option<DateTime<Utc>>,
    /// Disposal tip for the category
    pub tip: &'static str,
}

/// A titled recommendation derived from recent detections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short heading
    pub title: String,
    /// Body text
    pub message: String,
}

impl Recommendation {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

const RECOMMENDATION_WINDOW_DAYS: i64 = 7;
const TIP_SAMPLE: usize = 5;

/// Statistics for each tracked category, in [`WasteCategory::TRACKED`] order.
///
/// Items classified as [`WasteCategory::Other`] are ignored.
pub fn category_stats(items: &[WasteItem]) -> Vec<CategoryStat> {
    let mut stats: Vec<CategoryStat> = WasteCategory::TRACKED
        .iter()
        .map(|category| CategoryStat {
            category: *category,
            count: 0,
            items: Vec::new(),
            last_detected: None,
            tip: category.tip(),
        })
        .collect();

    for item in items {
        let category = item.category();
        let Some(stat) = stats.iter_mut().find(|s| s.category == category) else {
            continue;
        };
        stat.count += 1;
        if !stat.items.contains(&item.item_type) {
            stat.items.push(item.item_type.clone());
        }
        stat.last_detected = stat.last_detected.max(Some(item.timestamp));
    }
    stats
}

/// Items detected strictly after `now - 7 days`.
pub fn recent_items(items: &[WasteItem], now: DateTime<Utc>) -> Vec<&WasteItem> {
    let cutoff = now - Duration::days(RECOMMENDATION_WINDOW_DAYS);
    items.iter().filter(|item| item.timestamp > cutoff).collect()
}

/// Recommendations based on the last seven days of detections.
pub fn recommendations(items: &[WasteItem], now: DateTime<Utc>) -> Vec<Recommendation> {
    let recent: Vec<WasteItem> = recent_items(items, now).into_iter().cloned().collect();
    let stats = category_stats(&recent);
    let stat = |category: WasteCategory| stats.iter().find(|s| s.category == category);

    let mut out = Vec::new();
    if let Some(s) = stat(WasteCategory::Electronic).filter(|s| s.count > 0) {
        out.push(Recommendation::new(
            "E-Waste Alert",
            format!(
                "Detected {}. Please take these to an e-waste recycling center.",
                s.items.join(", ")
            ),
        ));
    }
    if let Some(s) = stat(WasteCategory::Recyclable).filter(|s| s.count > 0) {
        out.push(Recommendation::new(
            "Recyclable Items",
            format!(
                "Found {} recyclable items. Remember to clean and separate them properly.",
                s.count
            ),
        ));
    }
    if stat(WasteCategory::Hazardous).is_some_and(|s| s.count > 0) {
        out.push(Recommendation::new(
            "Hazardous Waste Warning",
            "Detected hazardous items. These require special disposal methods. Do not mix with regular waste!",
        ));
    }
    if stat(WasteCategory::Organic).is_some_and(|s| s.count > 0) {
        out.push(Recommendation::new(
            "Organic Waste Tips",
            "Consider composting your organic waste to reduce landfill impact and create nutrient-rich soil.",
        ));
    }
    out
}

/// Handling tips for the five most recent items, deduplicated.
pub fn recycling_tips(items: &[WasteItem]) -> Vec<&'static str> {
    let start = items.len().saturating_sub(TIP_SAMPLE);
    let mut tips: Vec<&'static str> = Vec::new();
    let mut add = |tip: &'static str| {
        if !tips.contains(&tip) {
            tips.push(tip);
        }
    };

    for item in &items[start..] {
        let label = item.item_type.to_lowercase();
        if label.contains("laptop") || label.contains("phone") {
            add("Backup and erase personal data before recycling electronic devices");
        }
        if label.contains("battery") {
            add("Never dispose of batteries in regular trash - they contain harmful chemicals");
        }
        if label.contains("plastic") || label.contains("bottle") {
            add("Rinse plastic containers and remove caps before recycling");
        }
        if label.contains("paper") || label.contains("cardboard") {
            add("Keep paper products dry and free from food contamination");
        }
        match item.category() {
            WasteCategory::Electronic => {
                add("Check with local electronics stores for recycling programs")
            }
            WasteCategory::Hazardous => {
                add("Store hazardous materials in original containers until proper disposal")
            }
            WasteCategory::Organic => add("Use a sealed container for composting to control odors"),
            WasteCategory::Recyclable => add("Flatten boxes and containers to save space"),
            WasteCategory::Other => {}
        }
    }
    tips
}

/// Item counts for every category, `other` included.
pub fn category_breakdown(items: &[WasteItem]) -> BTreeMap<WasteCategory, usize> {
    let mut breakdown = BTreeMap::new();
    for item in items {
        *breakdown.entry(item.category()).or_insert(0) += 1;
    }
    breakdown
}
