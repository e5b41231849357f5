//! Loading detections from JSON files.

use chrono::{DateTime, Utc};
use ecocycle_core::{Detection, WasteItem, WasteStore};
use ecocycle_error::{EcocycleResult, InputError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Accepted layouts of a detections file.
///
/// Either recorded items (`{"type", "timestamp", "confidence"}`), as kept by
/// a session or exported from history, or one raw detector frame
/// (`{"class", "score", "bbox"}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetectionsFile {
    Items(Vec<WasteItem>),
    Frame(Vec<Detection>),
}

/// Build a session store from a JSON string.
///
/// Recorded items are taken as-is. A raw frame goes through the same
/// relevance and confidence filter as live detection, stamped with `now`.
pub fn parse_detections(json: &str, now: DateTime<Utc>) -> EcocycleResult<WasteStore> {
    let parsed: DetectionsFile = serde_json::from_str(json).map_err(|e| {
        InputError::new(format!(
            "Expected an array of recorded items or detections: {}",
            e
        ))
    })?;

    let mut store = WasteStore::new();
    match parsed {
        DetectionsFile::Items(items) => {
            for item in items {
                store.add_detection(item);
            }
        }
        DetectionsFile::Frame(detections) => {
            let kept = store.record_frame(&detections, now);
            debug!(total = detections.len(), kept, "Filtered detector frame");
        }
    }
    Ok(store)
}

/// Read a detections file into a session store.
#[instrument(skip(path, now), fields(path = %path.as_ref().display()))]
pub fn load_detections(path: impl AsRef<Path>, now: DateTime<Utc>) -> EcocycleResult<WasteStore> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| {
        InputError::new(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_detections(&json, now)
}
