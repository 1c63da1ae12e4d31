//! Metrics helper functions

use std::time::Instant;

use prometheus::{Encoder, TextEncoder};

use super::{RESOLUTIONS_TOTAL, RESOLUTION_DURATION, STORE_LOOKUPS_TOTAL};
use crate::error::ContentResult;

/// Encode all registered metrics in Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper for recording resolution outcomes
pub struct ResolutionMetrics;

impl ResolutionMetrics {
    /// Record the outcome and latency of a resolution started at `started`
    pub fn record<T>(kind: &str, started: Instant, result: &ContentResult<T>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => e.code(),
        };
        RESOLUTIONS_TOTAL.with_label_values(&[kind, outcome]).inc();
        RESOLUTION_DURATION
            .with_label_values(&[kind])
            .observe(started.elapsed().as_secs_f64());
    }
}

/// Helper for recording accessor reads
pub struct StoreMetrics;

impl StoreMetrics {
    pub fn record_lookup(accessor: &str) {
        STORE_LOOKUPS_TOTAL.with_label_values(&[accessor]).inc();
    }
}
