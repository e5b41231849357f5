//! Session state: detected items and chat history.

use crate::{Detection, WasteItem, relevant_detections};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    /// The person asking
    User,
    /// The advice assistant
    Assistant,
}

/// One message in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A message from the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// A message from the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// In-memory state for one detection session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Getters)]
pub struct WasteStore {
    detected_items: Vec<WasteItem>,
    chat_history: Vec<ChatMessage>,
    selected_image: Option<String>,
}

impl WasteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a detected item.
    pub fn add_detection(&mut self, item: WasteItem) {
        self.detected_items.push(item);
    }

    /// Append every relevant, confident prediction from one detector frame.
    ///
    /// Returns how many items were added.
    pub fn record_frame(&mut self, detections: &[Detection], at: DateTime<Utc>) -> usize {
        let kept = relevant_detections(detections);
        let added = kept.len();
        self.detected_items
            .extend(kept.into_iter().map(|d| WasteItem::from_detection(d, at)));
        debug!(added, total = self.detected_items.len(), "Recorded detector frame");
        added
    }

    /// Append a chat message.
    pub fn add_chat_message(&mut self, message: ChatMessage) {
        self.chat_history.push(message);
    }

    /// Select (or clear) the captured still being analysed.
    pub fn set_selected_image(&mut self, image: Option<String>) {
        self.selected_image = image;
    }

    /// Forget all detected items. Chat history is kept.
    pub fn clear_detections(&mut self) {
        self.detected_items.clear();
    }

    /// Distinct item labels in detection order, for use as advice context.
    pub fn context_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for item in &self.detected_items {
            if !labels.contains(&item.item_type) {
                labels.push(item.item_type.clone());
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_frame_filters_and_appends() {
        let mut store = WasteStore::new();
        let frame = vec![
            Detection::new("bottle", 0.9, [0.0; 4]),
            Detection::new("person", 0.99, [0.0; 4]),
            Detection::new("laptop", 0.4, [0.0; 4]),
        ];
        assert_eq!(store.record_frame(&frame, Utc::now()), 1);
        assert_eq!(store.detected_items().len(), 1);
        assert_eq!(store.detected_items()[0].item_type, "bottle");
    }

    #[test]
    fn clear_keeps_chat_history() {
        let mut store = WasteStore::new();
        store.add_detection(WasteItem::new("cup", Utc::now(), 0.8));
        store.add_chat_message(ChatMessage::user("How do I recycle this?"));
        store.clear_detections();
        assert!(store.detected_items().is_empty());
        assert_eq!(store.chat_history().len(), 1);
    }

    #[test]
    fn context_labels_are_distinct_in_order() {
        let mut store = WasteStore::new();
        let now = Utc::now();
        for label in ["cup", "laptop", "cup", "battery"] {
            store.add_detection(WasteItem::new(label, now, 0.9));
        }
        assert_eq!(store.context_labels(), vec!["cup", "laptop", "battery"]);
    }

    #[test]
    fn selected_image_round_trip() {
        let mut store = WasteStore::new();
        store.set_selected_image(Some("capture-01.jpg".to_string()));
        assert_eq!(store.selected_image().as_deref(), Some("capture-01.jpg"));
        store.set_selected_image(None);
        assert!(store.selected_image().is_none());
    }
}
