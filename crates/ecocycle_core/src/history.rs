//! Saved detection sessions and trend analysis.

use crate::{WasteCategory, WasteItem};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use ecocycle_error::{HistoryError, HistoryErrorKind, HistoryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Maximum number of records returned by [`HistoryStore::for_user`].
pub const HISTORY_LIMIT: usize = 30;

/// An item as stored in a history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    /// Item label
    #[serde(rename = "type")]
    pub item_type: String,
    /// Detector confidence
    pub confidence: f32,
}

impl From<&WasteItem> for DetectedItem {
    fn from(item: &WasteItem) -> Self {
        Self {
            item_type: item.item_type.clone(),
            confidence: item.confidence,
        }
    }
}

/// One saved detection session, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecord {
    /// Record identifier
    pub id: Uuid,
    /// Owner of the record
    pub user_id: String,
    /// Items per tracked category; `other` items are not stored
    pub detected_items: BTreeMap<WasteCategory, Vec<DetectedItem>>,
    /// When the record was saved
    pub timestamp: DateTime<Utc>,
}

impl WasteRecord {
    /// Group `items` into a new record for `user_id`.
    ///
    /// Every tracked category is present in the map, possibly empty.
    #[track_caller]
    pub fn from_items(
        user_id: &str,
        items: &[WasteItem],
        timestamp: DateTime<Utc>,
    ) -> HistoryResult<Self> {
        if user_id.trim().is_empty() {
            return Err(HistoryError::new(HistoryErrorKind::MissingUser));
        }
        if items.is_empty() {
            return Err(HistoryError::new(HistoryErrorKind::NothingToRecord));
        }

        let mut detected_items: BTreeMap<WasteCategory, Vec<DetectedItem>> = WasteCategory::TRACKED
            .iter()
            .map(|category| (*category, Vec::new()))
            .collect();
        for item in items {
            if let Some(bucket) = detected_items.get_mut(&item.category()) {
                bucket.push(DetectedItem::from(item));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            detected_items,
            timestamp,
        })
    }

    /// Number of stored items across all categories.
    pub fn total_items(&self) -> usize {
        self.detected_items.values().map(Vec::len).sum()
    }
}

/// Persistence for detection history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Save a session for `user_id`, returning the new record id.
    async fn save(&self, user_id: &str, items: &[WasteItem]) -> HistoryResult<Uuid>;

    /// The user's records, newest first, at most [`HISTORY_LIMIT`].
    async fn for_user(&self, user_id: &str) -> HistoryResult<Vec<WasteRecord>>;

    /// The user's records saved at or after `cutoff`, newest first.
    async fn since(&self, user_id: &str, cutoff: DateTime<Utc>) -> HistoryResult<Vec<WasteRecord>>;
}

/// Process-local [`HistoryStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    records: Arc<RwLock<Vec<WasteRecord>>>,
}

impl InMemoryHistory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prebuilt record, e.g. one loaded from elsewhere.
    pub async fn insert(&self, record: WasteRecord) {
        self.records.write().await.push(record);
    }

    async fn newest_first<F>(&self, user_id: &str, keep: F) -> Vec<WasteRecord>
    where
        F: Fn(&WasteRecord) -> bool,
    {
        let records = self.records.read().await;
        let mut matching: Vec<WasteRecord> = records
            .iter()
            .filter(|r| r.user_id == user_id && keep(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn save(&self, user_id: &str, items: &[WasteItem]) -> HistoryResult<Uuid> {
        let record = WasteRecord::from_items(user_id, items, Utc::now())?;
        let id = record.id;
        debug!(%id, stored = record.total_items(), "Saving waste record");
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn for_user(&self, user_id: &str) -> HistoryResult<Vec<WasteRecord>> {
        let mut records = self.newest_first(user_id, |_| true).await;
        records.truncate(HISTORY_LIMIT);
        Ok(records)
    }

    async fn since(&self, user_id: &str, cutoff: DateTime<Utc>) -> HistoryResult<Vec<WasteRecord>> {
        Ok(self.newest_first(user_id, |r| r.timestamp >= cutoff).await)
    }
}

/// Item totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrend {
    /// UTC calendar date
    pub date: NaiveDate,
    /// Items stored that day
    pub total: usize,
    /// Count per item label
    pub items: BTreeMap<String, usize>,
}

/// Group records by UTC calendar date, oldest first.
pub fn daily_trend(records: &[WasteRecord]) -> Vec<DailyTrend> {
    let mut by_date: BTreeMap<NaiveDate, DailyTrend> = BTreeMap::new();
    for record in records {
        let date = record.timestamp.date_naive();
        let day = by_date.entry(date).or_insert_with(|| DailyTrend {
            date,
            total: 0,
            items: BTreeMap::new(),
        });
        for item in record.detected_items.values().flatten() {
            day.total += 1;
            *day.items.entry(item.item_type.clone()).or_insert(0) += 1;
        }
    }
    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn items(labels: &[&str]) -> Vec<WasteItem> {
        labels
            .iter()
            .map(|l| WasteItem::new(*l, Utc::now(), 0.8))
            .collect()
    }

    #[test]
    fn record_drops_other_and_keeps_all_buckets() {
        let record =
            WasteRecord::from_items("u1", &items(&["bottle", "xyz123", "laptop"]), Utc::now())
                .unwrap();
        assert_eq!(record.detected_items.len(), 4);
        assert_eq!(record.total_items(), 2);
        assert!(!record.detected_items.contains_key(&WasteCategory::Other));
        assert!(record.detected_items[&WasteCategory::Organic].is_empty());
    }

    #[test]
    fn record_requires_user() {
        let err = WasteRecord::from_items("", &items(&["cup"]), Utc::now()).unwrap_err();
        assert_eq!(err.kind(), &HistoryErrorKind::MissingUser);
    }

    #[test]
    fn daily_trend_groups_by_date() {
        let day1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let day2 = day1 + Duration::days(1);
        let records = vec![
            WasteRecord::from_items("u1", &items(&["cup", "cup"]), day2).unwrap(),
            WasteRecord::from_items("u1", &items(&["laptop"]), day1).unwrap(),
            WasteRecord::from_items("u1", &items(&["cup"]), day1 + Duration::hours(3)).unwrap(),
        ];
        let trend = daily_trend(&records);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, day1.date_naive());
        assert_eq!(trend[0].total, 2);
        assert_eq!(trend[0].items.get("laptop"), Some(&1));
        assert_eq!(trend[1].items.get("cup"), Some(&2));
    }
}
