//! Metrics collection and exposition.
//!
//! # Metrics
//! - `filegate_requests_total` (counter): requests by method, status, area
//! - `filegate_request_duration_seconds` (histogram): latency by method, area
//! - `filegate_auth_rejections_total` (counter): API rejections by reason
//! - `filegate_share_expired_total` (counter): expired share links removed
//!
//! # Design Decisions
//! - The `area` label is the top-level area, never the raw path, to keep
//!   cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus metrics enabled"),
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled"),
    }
}

/// Top-level area label for a decoded request path.
pub fn area_label(path: &str) -> &'static str {
    let path = path.to_ascii_lowercase();
    if path == "/sw.js" {
        "sw"
    } else if path.starts_with("/static") {
        "static"
    } else if path.starts_with("/api") {
        "api"
    } else if path.starts_with("/preview") {
        "preview"
    } else if path.starts_with("/share/") {
        "share"
    } else {
        "ui"
    }
}

pub fn record_request(method: &str, status: u16, area: &'static str, start: Instant) {
    let duration = start.elapsed().as_secs_f64();

    metrics::counter!(
        "filegate_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "area" => area
    )
    .increment(1);

    metrics::histogram!(
        "filegate_request_duration_seconds",
        "method" => method.to_string(),
        "area" => area
    )
    .record(duration);
}

pub fn record_auth_rejected(reason: &'static str) {
    metrics::counter!("filegate_auth_rejections_total", "reason" => reason).increment(1);
}

pub fn record_share_expired() {
    metrics::counter!("filegate_share_expired_total").increment(1);
}
