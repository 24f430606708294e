//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Pipeline (analysis duration, batch outcomes)
//! - External services (ticket source, scoring oracle)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts};

// =============================================================================
// Pipeline
// =============================================================================

/// End-to-end analysis duration in seconds.
pub static ANALYSIS_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "supportscore_analysis_duration_seconds",
            "Duration of a full client analysis",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
    )
    .unwrap()
});

/// Per-ticket score batches by outcome.
pub static SCORE_BATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "supportscore_score_batches_total",
            "Per-ticket score batches processed",
        ),
        &["result"], // "ok", "oracle_error", "parse_error"
    )
    .unwrap()
});

/// Overall score batches by outcome.
pub static OVERALL_BATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "supportscore_overall_batches_total",
            "Overall score batches processed",
        ),
        &["result"], // "ok", "oracle_error", "parse_error"
    )
    .unwrap()
});

// =============================================================================
// External services
// =============================================================================

/// Requests to external services by service name and result.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "supportscore_external_service_requests_total",
            "Requests made to external services",
        ),
        &["service", "result"], // service: "source", "oracle"; result: "ok", "error"
    )
    .unwrap()
});

/// External service request duration in seconds.
pub static EXTERNAL_SERVICE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "supportscore_external_service_duration_seconds",
            "Duration of external service requests",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
    )
    .unwrap()
});

/// Returns all core metrics for registration with a Prometheus registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ANALYSIS_DURATION.clone()),
        Box::new(SCORE_BATCHES.clone()),
        Box::new(OVERALL_BATCHES.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
    ]
}
