//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): by route, status
//! - `gateway_request_duration_seconds` (histogram): by route
//! - `gateway_upstream_requests_total` (counter): by service, outcome
//! - `gateway_upstream_duration_seconds` (histogram): by service
//! - `gateway_swaps_total` (counter): by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a served API request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a call to the router or price service.
pub fn record_upstream(service: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("gateway_upstream_requests_total", "service" => service, "outcome" => outcome)
        .increment(1);
    histogram!("gateway_upstream_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

/// Record the end state of a swap execution.
pub fn record_swap(outcome: &'static str) {
    counter!("gateway_swaps_total", "outcome" => outcome).increment(1);
}
