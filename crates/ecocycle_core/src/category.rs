//! Waste category classification.
//!
//! Labels come from a COCO-SSD style detector, so the tables below are
//! keyed on that vocabulary. Classification is a direct table lookup first,
//! then a two-way substring scan over each category's keyword list.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Classification bucket for a detected physical item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WasteCategory {
    /// Glass, metal, paper and plastic goods
    Recyclable,
    /// Electronic devices and appliances
    Electronic,
    /// Sharp, toxic or otherwise dangerous items
    Hazardous,
    /// Food and plant matter
    Organic,
    /// Anything not matched by the tables
    Other,
}

impl WasteCategory {
    /// The categories that carry disposal guidance, in scan order.
    pub const TRACKED: [WasteCategory; 4] = [
        WasteCategory::Recyclable,
        WasteCategory::Electronic,
        WasteCategory::Hazardous,
        WasteCategory::Organic,
    ];

    /// Keyword list scanned when the direct table has no entry.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            WasteCategory::Recyclable => RECYCLABLE_KEYWORDS,
            WasteCategory::Electronic => ELECTRONIC_KEYWORDS,
            WasteCategory::Hazardous => HAZARDOUS_KEYWORDS,
            WasteCategory::Organic => ORGANIC_KEYWORDS,
            WasteCategory::Other => &[],
        }
    }

    /// One-line disposal tip shown next to category totals.
    pub fn tip(&self) -> &'static str {
        match self {
            WasteCategory::Recyclable => "Clean and separate before recycling",
            WasteCategory::Electronic => "Take to e-waste collection center",
            WasteCategory::Hazardous => "Requires special disposal",
            WasteCategory::Organic => "Suitable for composting",
            WasteCategory::Other => "Dispose of with general waste",
        }
    }
}

const RECYCLABLE_KEYWORDS: &[&str] = &[
    "bottle",
    "cup",
    "wine glass",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "vase",
    "scissors",
    "book",
    "clock",
    "suitcase",
    "umbrella",
    "handbag",
    "backpack",
    "sports ball",
    "kite",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "plate",
    "tin can",
    "aluminum can",
    "cardboard box",
    "paper",
    "magazine",
    "newspaper",
];

const ELECTRONIC_KEYWORDS: &[&str] = &[
    "laptop",
    "tv",
    "tvmonitor",
    "cell phone",
    "remote",
    "keyboard",
    "mouse",
    "computer",
    "monitor",
    "microwave",
    "oven",
    "toaster",
    "refrigerator",
    "hair drier",
    "clock",
];

const HAZARDOUS_KEYWORDS: &[&str] = &[
    "scissors",
    "knife",
    "hair drier",
    "battery",
    "fire hydrant",
    "stop sign",
    "traffic light",
    "parking meter",
];

const ORGANIC_KEYWORDS: &[&str] = &[
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "potted plant",
    "food",
    "fruit",
    "vegetable",
    "plant",
    "dining table",
];

// Exact labels whose category differs from (or wins over) the keyword scan.
const DIRECT_MAPPINGS: &[(&str, WasteCategory)] = &[
    ("cup", WasteCategory::Recyclable),
    ("bottle", WasteCategory::Recyclable),
    ("wine glass", WasteCategory::Recyclable),
    ("bowl", WasteCategory::Recyclable),
    ("dining table", WasteCategory::Recyclable),
    ("chair", WasteCategory::Recyclable),
    ("couch", WasteCategory::Recyclable),
    ("potted plant", WasteCategory::Organic),
    ("laptop", WasteCategory::Electronic),
    ("keyboard", WasteCategory::Electronic),
    ("mouse", WasteCategory::Electronic),
    ("tvmonitor", WasteCategory::Electronic),
    ("tv", WasteCategory::Electronic),
    ("cell", WasteCategory::Electronic),
    ("phone", WasteCategory::Electronic),
    ("microwave", WasteCategory::Electronic),
    ("oven", WasteCategory::Electronic),
    ("toaster", WasteCategory::Electronic),
    ("refrigerator", WasteCategory::Electronic),
    ("book", WasteCategory::Recyclable),
    ("clock", WasteCategory::Recyclable),
    ("vase", WasteCategory::Recyclable),
    ("scissors", WasteCategory::Hazardous),
    ("knife", WasteCategory::Hazardous),
    ("hair drier", WasteCategory::Hazardous),
    ("banana", WasteCategory::Organic),
    ("apple", WasteCategory::Organic),
    ("sandwich", WasteCategory::Organic),
    ("orange", WasteCategory::Organic),
    ("broccoli", WasteCategory::Organic),
    ("carrot", WasteCategory::Organic),
    ("hot dog", WasteCategory::Organic),
    ("pizza", WasteCategory::Organic),
    ("donut", WasteCategory::Organic),
    ("cake", WasteCategory::Organic),
];

/// Map a free-text item label to its waste category.
///
/// The label is trimmed and lowercased. An empty label is [`WasteCategory::Other`].
///
/// # Examples
///
/// ```
/// use ecocycle_core::{WasteCategory, classify};
///
/// assert_eq!(classify("Laptop"), WasteCategory::Electronic);
/// assert_eq!(classify("plastic bottle"), WasteCategory::Recyclable);
/// assert_eq!(classify("banana peel"), WasteCategory::Organic);
/// assert_eq!(classify("xyz123"), WasteCategory::Other);
/// ```
pub fn classify(label: &str) -> WasteCategory {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return WasteCategory::Other;
    }

    if let Some((_, category)) = DIRECT_MAPPINGS.iter().find(|(key, _)| *key == label) {
        trace!(label = %label, %category, "Direct category mapping");
        return *category;
    }

    for category in WasteCategory::TRACKED {
        let matched = category
            .keywords()
            .iter()
            .any(|keyword| label.contains(keyword) || keyword.contains(label.as_str()));
        if matched {
            trace!(label = %label, %category, "Keyword category match");
            return category;
        }
    }

    trace!(label = %label, "No category found");
    WasteCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn direct_mapping_wins_over_keyword_order() {
        // "knife" is in the recyclable keyword list, but the direct table says hazardous
        assert_eq!(classify("knife"), WasteCategory::Hazardous);
        assert_eq!(classify("potted plant"), WasteCategory::Organic);
    }

    #[test]
    fn keyword_contained_in_label() {
        assert_eq!(classify("plastic bottle"), WasteCategory::Recyclable);
        assert_eq!(classify("AA battery"), WasteCategory::Hazardous);
        assert_eq!(classify("banana peel"), WasteCategory::Organic);
    }

    #[test]
    fn label_contained_in_keyword() {
        assert_eq!(classify("cell phone"), WasteCategory::Electronic);
        assert_eq!(classify("hydrant"), WasteCategory::Hazardous);
    }

    #[test]
    fn unmatched_and_empty_labels_are_other() {
        assert_eq!(classify("xyz123"), WasteCategory::Other);
        assert_eq!(classify("   "), WasteCategory::Other);
    }

    #[test]
    fn classification_is_idempotent() {
        for label in ["laptop", "plastic bottle", "banana peel", "xyz123", "Stop Sign"] {
            assert_eq!(classify(label), classify(label));
        }
    }

    #[test]
    fn category_parses_from_lowercase_name() {
        assert_eq!(WasteCategory::from_str("electronic").unwrap(), WasteCategory::Electronic);
        assert_eq!(WasteCategory::Organic.to_string(), "organic");
    }
}
