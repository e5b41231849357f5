//! End-to-end tests over a detection session: filter, classify, aggregate.

use chrono::Utc;
use ecocycle_core::{
    Detection, WasteCategory, WasteStore, category_breakdown, category_stats, classify,
    recommendations, recycling_tips,
};

#[test]
fn test_classifier_reference_labels() {
    assert_eq!(classify("plastic bottle"), WasteCategory::Recyclable);
    assert_eq!(classify("laptop"), WasteCategory::Electronic);
    assert_eq!(classify("banana peel"), WasteCategory::Organic);
    assert_eq!(classify("xyz123"), WasteCategory::Other);
}

#[test]
fn test_session_frame_feeds_insights() {
    let mut store = WasteStore::new();
    let now = Utc::now();
    let frame = vec![
        Detection::new("bottle", 0.92, [10.0, 10.0, 40.0, 80.0]),
        Detection::new("laptop", 0.81, [60.0, 20.0, 120.0, 90.0]),
        Detection::new("person", 0.97, [0.0, 0.0, 200.0, 400.0]),
        Detection::new("cup", 0.42, [5.0, 5.0, 20.0, 20.0]),
    ];
    assert_eq!(store.record_frame(&frame, now), 2);

    let stats = category_stats(store.detected_items());
    let counts: Vec<(WasteCategory, usize)> = stats.iter().map(|s| (s.category, s.count)).collect();
    assert_eq!(
        counts,
        vec![
            (WasteCategory::Recyclable, 1),
            (WasteCategory::Electronic, 1),
            (WasteCategory::Hazardous, 0),
            (WasteCategory::Organic, 0),
        ]
    );

    let titles: Vec<String> = recommendations(store.detected_items(), now)
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["E-Waste Alert", "Recyclable Items"]);

    let tips = recycling_tips(store.detected_items());
    assert!(tips.contains(&"Rinse plastic containers and remove caps before recycling"));
    assert!(tips.contains(&"Backup and erase personal data before recycling electronic devices"));

    let breakdown = category_breakdown(store.detected_items());
    assert_eq!(breakdown.values().sum::<usize>(), 2);
}
