//! Metrics collection and exposition.
//!
//! # Metrics
//! - `weather_proxy_requests_total` (counter): responses by status code
//! - `weather_proxy_request_duration_seconds` (histogram): latency distribution
//! - `weather_proxy_cache_events_total` (counter): reply cache hits and misses
//! - `weather_proxy_cache_size` (gauge): cached reply count
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Prometheus exposition on a separate listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(status: u16, start_time: Instant) {
    counter!("weather_proxy_requests_total", "status" => status.to_string()).increment(1);
    histogram!("weather_proxy_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a reply cache lookup.
pub fn record_cache_event(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!("weather_proxy_cache_events_total", "outcome" => outcome).increment(1);
}

/// Record the current reply cache size.
pub fn record_cache_size(size: usize) {
    gauge!("weather_proxy_cache_size").set(size as f64);
}
