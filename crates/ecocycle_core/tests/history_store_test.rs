//! Tests for the in-memory detection history.

use chrono::{Duration, Utc};
use ecocycle_core::{
    HISTORY_LIMIT, HistoryStore, InMemoryHistory, WasteCategory, WasteItem, WasteRecord,
};
use ecocycle_error::HistoryErrorKind;

fn session(labels: &[&str]) -> Vec<WasteItem> {
    labels
        .iter()
        .map(|l| WasteItem::new(*l, Utc::now(), 0.9))
        .collect()
}

#[tokio::test]
async fn test_save_and_load_for_user() -> anyhow::Result<()> {
    let history = InMemoryHistory::new();
    let id = history.save("alice", &session(&["bottle", "laptop"])).await?;
    history.save("bob", &session(&["banana"])).await?;

    let records = history.for_user("alice").await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].detected_items[&WasteCategory::Electronic].len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_save_without_user_is_rejected() {
    let history = InMemoryHistory::new();
    let err = history.save("", &session(&["cup"])).await.unwrap_err();
    assert_eq!(err.kind(), &HistoryErrorKind::MissingUser);
}

#[tokio::test]
async fn test_save_without_items_is_rejected() {
    let history = InMemoryHistory::new();
    let err = history.save("alice", &[]).await.unwrap_err();
    assert_eq!(err.kind(), &HistoryErrorKind::NothingToRecord);
}

#[tokio::test]
async fn test_for_user_is_newest_first_and_capped() -> anyhow::Result<()> {
    let history = InMemoryHistory::new();
    let base = Utc::now() - Duration::days(40);
    for day in 0..(HISTORY_LIMIT as i64 + 5) {
        let record = WasteRecord::from_items("alice", &session(&["cup"]), base + Duration::days(day))?;
        history.insert(record).await;
    }

    let records = history.for_user("alice").await?;
    assert_eq!(records.len(), HISTORY_LIMIT);
    assert!(records.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(records[0].timestamp, base + Duration::days(HISTORY_LIMIT as i64 + 4));
    Ok(())
}

#[tokio::test]
async fn test_since_filters_by_cutoff() -> anyhow::Result<()> {
    let history = InMemoryHistory::new();
    let now = Utc::now();
    for age in [45, 20, 3] {
        let record =
            WasteRecord::from_items("alice", &session(&["tv"]), now - Duration::days(age))?;
        history.insert(record).await;
    }

    let recent = history.since("alice", now - Duration::days(30)).await?;
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].timestamp, now - Duration::days(3));
    Ok(())
}
