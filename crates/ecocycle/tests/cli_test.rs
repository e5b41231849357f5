//! Tests for CLI argument handling and the offline commands.

use chrono::{Duration, TimeZone, Utc};
use clap::Parser;
use ecocycle::cli::{
    Cli, Commands, InsightsReport, OutputFormat, RateLimitOptions, classify_labels, load_config,
    load_detections, parse_detections, render_classifications, render_config,
};
use ecocycle::{AdmissionPolicy, EcocycleConfig, WasteCategory};
use std::io::Write;

#[test]
fn overrides_replace_only_given_fields() {
    let options = RateLimitOptions {
        rpm: Some(2),
        admission: Some(AdmissionPolicy::Wait),
        model: Some("gemini-2.5-flash".to_string()),
        ..RateLimitOptions::default()
    };
    let config = options.apply_to_config(EcocycleConfig::default());

    assert_eq!(config.gateway.rpm, 2);
    assert_eq!(config.gateway.admission, AdmissionPolicy::Wait);
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    assert_eq!(config.gateway.tpm, 5_000);
    assert_eq!(config.gateway.inter_request_delay_ms, 2_000);
}

#[test]
fn empty_overrides_leave_config_untouched() {
    let config = RateLimitOptions::default().apply_to_config(EcocycleConfig::default());
    assert_eq!(config, EcocycleConfig::default());
}

#[test]
fn advise_parses_labels_and_limits() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from([
        "ecocycle",
        "advise",
        "How do I recycle these?",
        "--labels",
        "laptop,bottle",
        "--rpm",
        "3",
        "--admission",
        "wait",
    ])?;

    match cli.command {
        Commands::Advise {
            question,
            labels,
            limits,
            detections,
        } => {
            assert_eq!(question, "How do I recycle these?");
            assert_eq!(labels, vec!["laptop".to_string(), "bottle".to_string()]);
            assert_eq!(limits.rpm, Some(3));
            assert_eq!(limits.admission, Some(AdmissionPolicy::Wait));
            assert!(detections.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
    Ok(())
}

#[test]
fn unknown_admission_policy_is_rejected() {
    let parsed = Cli::try_parse_from(["ecocycle", "guide", "battery", "--admission", "queue"]);
    assert!(parsed.is_err());
}

#[test]
fn classify_requires_a_label() {
    assert!(Cli::try_parse_from(["ecocycle", "classify"]).is_err());
}

#[test]
fn classification_output() -> anyhow::Result<()> {
    let labels = vec!["laptop".to_string(), "banana".to_string(), "chair".to_string()];
    let classified = classify_labels(&labels);
    assert_eq!(classified[0].category, WasteCategory::Electronic);
    assert_eq!(classified[1].category, WasteCategory::Organic);
    assert_eq!(classified[2].category, WasteCategory::Recyclable);

    let human = render_classifications(&classified, OutputFormat::Human)?;
    assert!(human.starts_with("laptop: electronic (Take to e-waste collection center)"));

    let json: serde_json::Value =
        serde_json::from_str(&render_classifications(&classified, OutputFormat::Json)?)?;
    assert_eq!(json[1]["category"], "organic");
    Ok(())
}

#[test]
fn raw_frame_is_filtered() -> anyhow::Result<()> {
    let json = r#"[
        {"class": "person", "score": 0.99, "bbox": [0, 0, 10, 10]},
        {"class": "cup", "score": 0.88, "bbox": [1, 2, 3, 4]},
        {"class": "laptop", "score": 0.4, "bbox": [1, 2, 3, 4]}
    ]"#;
    let store = parse_detections(json, Utc::now())?;
    let labels: Vec<&str> = store
        .detected_items()
        .iter()
        .map(|item| item.item_type.as_str())
        .collect();
    assert_eq!(labels, vec!["cup"]);
    Ok(())
}

#[test]
fn recorded_items_load_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"[
            {{"type": "laptop", "timestamp": "2024-03-01T10:00:00Z", "confidence": 0.91}},
            {{"type": "battery", "timestamp": "2024-03-02T10:00:00Z", "confidence": 0.77}}
        ]"#
    )?;

    let store = load_detections(file.path(), Utc::now())?;
    assert_eq!(store.detected_items().len(), 2);
    assert_eq!(store.detected_items()[1].item_type, "battery");
    Ok(())
}

#[test]
fn missing_detections_file_is_an_error() {
    assert!(load_detections("/nonexistent/detections.json", Utc::now()).is_err());
}

#[test]
fn insights_report_aggregates_session() -> anyhow::Result<()> {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).single().unwrap();
    let day = |d: i64| (now - Duration::days(d)).to_rfc3339();
    let json = format!(
        r#"[
            {{"type": "laptop", "timestamp": "{}", "confidence": 0.9}},
            {{"type": "bottle", "timestamp": "{}", "confidence": 0.8}},
            {{"type": "chair", "timestamp": "{}", "confidence": 0.7}}
        ]"#,
        day(1),
        day(2),
        day(30)
    );
    let store = parse_detections(&json, now)?;
    let report = InsightsReport::from_store(&store, now);

    assert_eq!(report.stats.len(), 4);
    assert_eq!(report.breakdown[&WasteCategory::Recyclable], 2);
    assert!(report.recommendations.iter().any(|r| r.title == "E-Waste Alert"));

    let human = report.render(OutputFormat::Human)?;
    assert!(human.contains("electronic: 1 items (laptop)"));

    let json: serde_json::Value = serde_json::from_str(&report.render(OutputFormat::Json)?)?;
    assert_eq!(json["breakdown"]["electronic"], 1);
    Ok(())
}

#[test]
fn config_file_and_overrides_combine() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    write!(file, "[gateway]\nrpm = 10\ntpm = 9000\n")?;

    let limits = RateLimitOptions {
        tpm: Some(100),
        ..RateLimitOptions::default()
    };
    let config = load_config(Some(file.path()), &limits)?;
    assert_eq!(config.gateway.rpm, 10);
    assert_eq!(config.gateway.tpm, 100);
    assert_eq!(config.gateway.request_timeout_secs, 30);

    let rendered = render_config(&config, OutputFormat::Human)?;
    assert!(rendered.contains("rpm = 10"));
    Ok(())
}

#[test]
fn zero_rpm_override_fails_validation() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    write!(file, "[gateway]\nrpm = 4\n")?;

    let limits = RateLimitOptions {
        rpm: Some(0),
        ..RateLimitOptions::default()
    };
    assert!(load_config(Some(file.path()), &limits).is_err());
    Ok(())
}
