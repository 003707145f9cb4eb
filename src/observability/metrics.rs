//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by method, route, status
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_outbound_total` (counter): `/api/start` calls by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::observability::TelemetryError;

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), TelemetryError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("relay_requests_total", &labels).increment(1);
    histogram!("relay_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one outbound relay call.
pub fn record_outbound(outcome: &'static str) {
    counter!("relay_outbound_total", "outcome" => outcome).increment(1);
}
