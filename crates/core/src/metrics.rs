//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog requests (cache hits vs upstream fetches)
//! - Fetch pipeline outcomes and duration
//! - Outbound metadata API calls

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog requests by where the data came from.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelshelf_catalog_requests_total", "Total catalog requests"),
        &["source"], // "cache", "upstream"
    )
    .unwrap()
});

/// Fetch pipeline outcomes on the cold path.
pub static CATALOG_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelshelf_catalog_fetches_total",
            "Total upstream catalog fetches by outcome",
        ),
        &["result"], // "stored", "empty", "failed"
    )
    .unwrap()
});

/// Duration of an upstream catalog fetch in seconds.
pub static CATALOG_FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelshelf_catalog_fetch_duration_seconds",
            "Duration of the search and detail fan-out",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["result"],
    )
    .unwrap()
});

/// Number of titles in the last stored catalog.
pub static CATALOG_TITLES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "reelshelf_catalog_titles",
        "Number of titles in the last stored catalog",
    )
    .unwrap()
});

// =============================================================================
// Metadata API Metrics
// =============================================================================

/// Outbound metadata API calls.
pub static METADATA_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelshelf_metadata_requests_total",
            "Total outbound metadata API requests",
        ),
        &["call", "result"], // call: "search", "detail"; result: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_FETCHES.clone()),
        Box::new(CATALOG_FETCH_DURATION.clone()),
        Box::new(CATALOG_TITLES.clone()),
        Box::new(METADATA_REQUESTS.clone()),
    ]
}

/// Record the result of one outbound metadata call.
pub(crate) fn record_metadata_call<T, E>(call: &str, result: &Result<T, E>) {
    let outcome = if result.is_ok() { "success" } else { "error" };
    METADATA_REQUESTS
        .with_label_values(&[call, outcome])
        .inc();
}
