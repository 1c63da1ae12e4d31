//! Prometheus metrics for content resolution.
//!
//! - Resolution outcomes by entry point (`subscription`, `scheduler`)
//! - Resolution latency
//! - Accessor lookups by accessor name

mod helpers;

pub use helpers::{encode_metrics, ResolutionMetrics, StoreMetrics};

use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "notifier";

lazy_static! {
    /// Resolutions by entry point and outcome (`ok` or an error code)
    pub static ref RESOLUTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_resolutions_total", METRIC_PREFIX),
        "Total notification content resolutions",
        &["kind", "outcome"]
    ).unwrap();

    /// Time spent resolving one message specification
    pub static ref RESOLUTION_DURATION: HistogramVec = register_histogram_vec!(
        format!("{}_resolution_duration_seconds", METRIC_PREFIX),
        "Notification content resolution latency in seconds",
        &["kind"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    ).unwrap();

    /// Reads issued against the external accessors
    pub static ref STORE_LOOKUPS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_store_lookups_total", METRIC_PREFIX),
        "Total accessor lookups",
        &["accessor"]
    ).unwrap();
}
