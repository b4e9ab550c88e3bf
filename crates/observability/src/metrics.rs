//! Prometheus metrics
//!
//! Without an installed recorder every macro below is a no-op, so metrics
//! never affect request handling.

use metrics::{counter, gauge, histogram, Gauge, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

use crate::segment::SegmentKind;

/// Install the Prometheus recorder and serve `/metrics` on `port`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Inbound request metrics for one HTTP server.
///
/// * `http_requests_total{server, method, path, status}`
/// * `http_request_duration_seconds{server}`
/// * `http_requests_in_flight{server}`
#[derive(Clone)]
pub struct ServerMetrics {
    server_name: String,
    request_duration: Histogram,
    in_flight: Gauge,
}

impl ServerMetrics {
    pub fn new(server_name: &str) -> Self {
        let name = server_name.to_string();

        Self {
            request_duration: histogram!("http_request_duration_seconds", "server" => name.clone()),
            in_flight: gauge!("http_requests_in_flight", "server" => name.clone()),
            server_name: name,
        }
    }

    /// Record a completed request
    pub fn record_request(&self, method: &str, path: &str, duration: Duration, status_code: u16) {
        counter!(
            "http_requests_total",
            "server" => self.server_name.clone(),
            "method" => method.to_string(),
            "path" => path.to_string(),
            "status" => status_code.to_string()
        )
        .increment(1);
        self.request_duration.record(duration.as_secs_f64());
    }

    pub fn request_started(&self) {
        self.in_flight.increment(1.0);
    }

    pub fn request_finished(&self) {
        self.in_flight.decrement(1.0);
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

/// Record one outbound segment.
///
/// * `segment_calls_total{segment, namespace, outcome}`
/// * `segment_duration_seconds{segment, namespace}`
pub fn record_segment(name: &'static str, kind: SegmentKind, duration: Duration, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!(
        "segment_calls_total",
        "segment" => name,
        "namespace" => kind.namespace(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "segment_duration_seconds",
        "segment" => name,
        "namespace" => kind.namespace()
    )
    .record(duration.as_secs_f64());
}
