//! Prometheus metrics for the grape endpoints and the change hub.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP handler latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Grapes created counter metric name.
pub const METRIC_GRAPES_CREATED: &str = "grapes_created_total";
/// Grapes deleted counter metric name.
pub const METRIC_GRAPES_DELETED: &str = "grapes_deleted_total";
/// Hub broadcasts counter metric name.
pub const METRIC_BROADCASTS_SENT: &str = "grape_broadcasts_total";
/// Failed grape operations counter metric name.
pub const METRIC_OPERATIONS_FAILED: &str = "grape_operations_failed_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after installing a recorder.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "Grape endpoint latency in milliseconds"
    );

    describe_counter!(METRIC_GRAPES_CREATED, "Total number of grapes created");
    describe_counter!(METRIC_GRAPES_DELETED, "Total number of grapes deleted");
    describe_counter!(
        METRIC_BROADCASTS_SENT,
        "Total number of grape change broadcasts"
    );
    describe_counter!(
        METRIC_OPERATIONS_FAILED,
        "Total number of grape operations answered with a server error"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Increment grapes created counter.
pub fn inc_grapes_created() {
    counter!(METRIC_GRAPES_CREATED).increment(1);
}

/// Increment grapes deleted counter.
pub fn inc_grapes_deleted() {
    counter!(METRIC_GRAPES_DELETED).increment(1);
}

/// Increment broadcasts counter.
pub fn inc_broadcasts_sent() {
    counter!(METRIC_BROADCASTS_SENT).increment(1);
}

/// Increment failed operations counter for `operation`.
pub fn inc_operations_failed(operation: &'static str) {
    counter!(METRIC_OPERATIONS_FAILED, "operation" => operation).increment(1);
}

/// RAII guard for timing a handler.
/// Records latency under the endpoint label when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(latency_ms);
    }
}
