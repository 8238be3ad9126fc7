//! Prometheus metrics setup and metric definitions

use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Auth failure codes pre-registered at zero
const AUTH_FAILURE_CODES: &[&str] = &[
    "authorization_header_missing",
    "invalid_header",
    "invalid_token",
    "invalid_signature",
    "token_expired",
    "invalid_claims",
    "unauthorized",
    "jwks_unavailable",
];

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Prometheus defaults plus sub-millisecond buckets for fast endpoints
    let buckets = [
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so the
/// exposition includes HELP/TYPE lines from startup.
pub fn describe_metrics() {
    describe_counter!("drinks_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "drinks_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "drinks_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );
    describe_counter!(
        "drinks_auth_failures_total",
        "Rejected authorization checks by failure code"
    );

    gauge!("drinks_http_requests_in_flight").set(0.0);
    for code in AUTH_FAILURE_CODES {
        counter!("drinks_auth_failures_total", "code" => *code).absolute(0);
    }
}
