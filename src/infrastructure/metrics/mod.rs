//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Participant registrations and evictions
//! - Posted messages by kind
//! - Presence reaper runs by outcome
//! - Database connection pool gauges

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace("chat_room"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("chat_room")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Successful participant registrations
pub static PARTICIPANTS_REGISTERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("participants_registered_total", "Total participant registrations")
            .namespace("chat_room"),
    )
    .expect("Failed to create PARTICIPANTS_REGISTERED_TOTAL metric")
});

/// Participants evicted by the presence reaper
pub static PARTICIPANTS_REAPED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("participants_reaped_total", "Total participants removed for inactivity")
            .namespace("chat_room"),
    )
    .expect("Failed to create PARTICIPANTS_REAPED_TOTAL metric")
});

/// Messages appended to the log, by kind
pub static MESSAGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("messages_total", "Total messages appended to the log").namespace("chat_room"),
        &["kind"],
    )
    .expect("Failed to create MESSAGES_TOTAL metric")
});

/// Presence reaper runs, by outcome
pub static REAPER_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reaper_runs_total", "Total presence reaper sweeps").namespace("chat_room"),
        &["outcome"], // "ok", "failed"
    )
    .expect("Failed to create REAPER_RUNS_TOTAL metric")
});

/// Database connection pool stats
pub static DB_POOL_CONNECTIONS: Lazy<GaugeVec> = Lazy::new(|| {
    GaugeVec::new(
        Opts::new("db_pool_connections", "Database connection pool statistics")
            .namespace("chat_room"),
        &["state"], // "idle", "active", "max"
    )
    .expect("Failed to create DB_POOL_CONNECTIONS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(PARTICIPANTS_REGISTERED_TOTAL.clone()))
        .expect("Failed to register PARTICIPANTS_REGISTERED_TOTAL");
    registry
        .register(Box::new(PARTICIPANTS_REAPED_TOTAL.clone()))
        .expect("Failed to register PARTICIPANTS_REAPED_TOTAL");
    registry
        .register(Box::new(MESSAGES_TOTAL.clone()))
        .expect("Failed to register MESSAGES_TOTAL");
    registry
        .register(Box::new(REAPER_RUNS_TOTAL.clone()))
        .expect("Failed to register REAPER_RUNS_TOTAL");
    registry
        .register(Box::new(DB_POOL_CONNECTIONS.clone()))
        .expect("Failed to register DB_POOL_CONNECTIONS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record a successful registration
pub fn record_registration() {
    PARTICIPANTS_REGISTERED_TOTAL.inc();
}

/// Helper to record an appended message
pub fn record_message(kind: &str) {
    MESSAGES_TOTAL.with_label_values(&[kind]).inc();
}

/// Helper to record a reaper sweep
pub fn record_reaper_run(reaped: Option<u64>) {
    match reaped {
        Some(count) => {
            REAPER_RUNS_TOTAL.with_label_values(&["ok"]).inc();
            PARTICIPANTS_REAPED_TOTAL.inc_by(count);
        }
        None => REAPER_RUNS_TOTAL.with_label_values(&["failed"]).inc(),
    }
}

/// Helper to update database pool stats
pub fn update_db_pool_stats(idle: u32, active: u32, max: u32) {
    DB_POOL_CONNECTIONS
        .with_label_values(&["idle"])
        .set(idle as f64);
    DB_POOL_CONNECTIONS
        .with_label_values(&["active"])
        .set(active as f64);
    DB_POOL_CONNECTIONS
        .with_label_values(&["max"])
        .set(max as f64);
}
