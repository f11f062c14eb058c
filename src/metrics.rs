//! Prometheus metrics for the question API.
//!
//! This module provides:
//! - Counters for served, added, and rejected questions
//! - A gauge for the number of questions held in memory
//! - HTTP request latency per endpoint

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

// === Metric Name Constants ===

/// Questions returned by read endpoints.
pub const METRIC_QUESTIONS_SERVED: &str = "questions_served_total";
/// Questions created through the add endpoint.
pub const METRIC_QUESTIONS_ADDED: &str = "questions_added_total";
/// Add requests that failed validation or persistence.
pub const METRIC_QUESTION_ADD_FAILURES: &str = "question_add_failures_total";
/// Questions currently held in memory.
pub const METRIC_QUESTIONS_LOADED: &str = "questions_loaded";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Call once at startup; the returned handle renders the `/metrics` page.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Register metric descriptions with the active recorder.
pub fn init_metrics() {
    describe_counter!(
        METRIC_QUESTIONS_SERVED,
        "Total number of questions returned by read endpoints"
    );
    describe_counter!(
        METRIC_QUESTIONS_ADDED,
        "Total number of questions added"
    );
    describe_counter!(
        METRIC_QUESTION_ADD_FAILURES,
        "Total number of rejected or failed question submissions"
    );
    describe_gauge!(
        METRIC_QUESTIONS_LOADED,
        "Number of questions held in memory"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// How often histogram buckets are drained when nobody scrapes.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Periodically run exporter upkeep so histogram samples do not pile up
/// between scrapes.
pub fn spawn_upkeep(handle: PrometheusHandle, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Add `count` to the served-questions counter.
pub fn add_questions_served(count: usize) {
    counter!(METRIC_QUESTIONS_SERVED).increment(count as u64);
}

/// Increment the added-questions counter.
pub fn inc_questions_added() {
    counter!(METRIC_QUESTIONS_ADDED).increment(1);
}

/// Increment the failed-submissions counter.
pub fn inc_question_add_failures() {
    counter!(METRIC_QUESTION_ADD_FAILURES).increment(1);
}

/// Set the in-memory question gauge.
pub fn set_questions_loaded(count: usize) {
    gauge!(METRIC_QUESTIONS_LOADED).set(count as f64);
}

/// RAII guard for timing a request.
/// Records latency for its endpoint when dropped.
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
        debug!(endpoint = self.endpoint, latency_ms, "Request served");
    }
}
