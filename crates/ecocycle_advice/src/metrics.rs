//! Metrics for the advice gateway.
//!
//! Instruments are created on the global OpenTelemetry meter. Without an
//! installed exporter they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<AdviceMetrics> = OnceLock::new();

/// Counters and latency for advice requests, labelled by model.
#[derive(Clone)]
pub struct AdviceMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Requests dispatched to the provider
    pub requests: Counter<u64>,
    /// Failed requests, by error class
    pub errors: Counter<u64>,
    /// Requests answered locally because the window was full
    pub rejections: Counter<u64>,
    /// Provider call duration in seconds
    pub duration: Histogram<f64>,
}

impl AdviceMetrics {
    fn init() -> Self {
        let meter = global::meter("ecocycle_advice");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("advice.requests")
                .with_description("Advice requests dispatched to the provider")
                .build(),
            errors: meter
                .u64_counter("advice.errors")
                .with_description("Failed advice requests")
                .build(),
            rejections: meter
                .u64_counter("advice.rejections")
                .with_description("Advice requests rejected by the local rate window")
                .build(),
            duration: meter
                .f64_histogram("advice.duration")
                .with_unit("seconds")
                .with_description("Advice provider call duration")
                .build(),
        }
    }

    /// Get the global advice metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a dispatched request and its latency.
    pub fn record_request(&self, model: &str, duration_secs: f64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, model: &str, error_class: &'static str) {
        let labels = &[
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_class", error_class),
        ];
        self.errors.add(1, labels);
    }

    /// Record a local rate-window rejection.
    pub fn record_rejection(&self, model: &str, reason: &str) {
        let labels = &[
            KeyValue::new("model", model.to_string()),
            KeyValue::new("reason", reason.to_string()),
        ];
        self.rejections.add(1, labels);
    }
}

impl std::fmt::Debug for AdviceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceMetrics").finish_non_exhaustive()
    }
}
