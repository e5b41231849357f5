//! Object detections and the waste-relevance filter.
//!
//! The vision model itself is an external collaborator. This module only
//! describes what it returns and decides which predictions count as waste.

use crate::{WasteCategory, classify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Class names a detection must match (two-way substring) to be kept.
pub const WASTE_ALLOW_LIST: &[&str] = &[
    "bottle",
    "cup",
    "wine glass",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "laptop",
    "tv",
    "cell phone",
    "book",
    "clock",
    "vase",
    "scissors",
    "keyboard",
    "mouse",
    "remote",
    "microwave",
    "oven",
    "toaster",
    "refrigerator",
    "paper",
    "cardboard",
    "box",
    "can",
    "battery",
    "monitor",
    "computer",
    "printer",
    "phone",
];

/// Predictions at or below this score are neither drawn nor counted.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// A single prediction from the object detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detected class label
    pub class: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
    /// Bounding box as `[x, y, width, height]`
    pub bbox: [f32; 4],
}

impl Detection {
    /// Create a detection.
    pub fn new(class: impl Into<String>, score: f32, bbox: [f32; 4]) -> Self {
        Self {
            class: class.into(),
            score,
            bbox,
        }
    }

    /// Whether the class is waste-relevant (never `person`).
    pub fn is_waste_relevant(&self) -> bool {
        let class = self.class.to_lowercase();
        if class == "person" || class.is_empty() {
            return false;
        }
        WASTE_ALLOW_LIST
            .iter()
            .any(|item| class.contains(item) || item.contains(class.as_str()))
    }

    /// Whether the score clears [`CONFIDENCE_THRESHOLD`].
    pub fn is_confident(&self) -> bool {
        self.score > CONFIDENCE_THRESHOLD
    }

    /// Overlay label, e.g. `bottle (87%)`.
    pub fn overlay_label(&self) -> String {
        format!("{} ({}%)", self.class, (self.score * 100.0).round() as u32)
    }
}

/// Keep the detections that are both waste-relevant and confident.
pub fn relevant_detections(detections: &[Detection]) -> Vec<&Detection> {
    detections
        .iter()
        .filter(|d| d.is_waste_relevant() && d.is_confident())
        .collect()
}

/// A detected item recorded in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteItem {
    /// Item label as reported by the detector
    #[serde(rename = "type")]
    pub item_type: String,
    /// When the item was detected
    pub timestamp: DateTime<Utc>,
    /// Detector confidence
    pub confidence: f32,
}

impl WasteItem {
    /// Create an item.
    pub fn new(item_type: impl Into<String>, timestamp: DateTime<Utc>, confidence: f32) -> Self {
        Self {
            item_type: item_type.into(),
            timestamp,
            confidence,
        }
    }

    /// Build an item from a detector prediction.
    pub fn from_detection(detection: &Detection, timestamp: DateTime<Utc>) -> Self {
        Self::new(detection.class.clone(), timestamp, detection.score)
    }

    /// Category of this item.
    pub fn category(&self) -> WasteCategory {
        classify(&self.item_type)
    }
}
