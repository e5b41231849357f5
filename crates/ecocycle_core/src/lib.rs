//! Core data types for the Ecocycle workspace.
//!
//! This crate holds the pure domain pieces that sit in front of the advice
//! gateway: filtering raw object detections, mapping labels to waste
//! categories, session state, insight aggregation and detection history.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod detection;
mod generation;
mod history;
mod insights;
mod store;

pub use category::{WasteCategory, classify};
pub use detection::{
    CONFIDENCE_THRESHOLD, Detection, WASTE_ALLOW_LIST, WasteItem, relevant_detections,
};
pub use generation::{GenerationParams, GenerationParamsBuilder};
pub use history::{
    DailyTrend, DetectedItem, HISTORY_LIMIT, HistoryStore, InMemoryHistory, WasteRecord,
    daily_trend,
};
pub use insights::{
    CategoryStat, Recommendation, category_breakdown, category_stats, recent_items,
    recommendations, recycling_tips,
};
pub use store::{ChatMessage, ChatRole, WasteStore};
