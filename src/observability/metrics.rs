//! Metrics collection and exposition.
//!
//! # Metrics
//! - `readable_urls_redirects_total` (counter): redirects issued, by kind
//! - `readable_urls_requests_total` (counter): requests handed to the site, by outcome
//! - `readable_urls_fallback_hits_total` (counter): lookups satisfied by a fallback step
//! - `readable_urls_request_duration_seconds` (histogram): time spent in the rewrite layer and site handler

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_redirect(kind: &'static str) {
    counter!("readable_urls_redirects_total", "kind" => kind).increment(1);
}

pub fn record_request(outcome: &'static str, start: Instant) {
    counter!("readable_urls_requests_total", "outcome" => outcome).increment(1);
    histogram!("readable_urls_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_fallback_hit(step: &'static str) {
    counter!("readable_urls_fallback_hits_total", "step" => step).increment(1);
}
