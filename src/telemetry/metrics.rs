//! Prometheus metrics setup and metric definitions

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    // Prometheus defaults plus sub-millisecond buckets for fast endpoints.
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup (not just after first use).
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!(
        "scimgate_http_requests_total",
        "Total number of HTTP requests"
    );
    describe_histogram!(
        "scimgate_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "scimgate_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    // SCIM metrics
    describe_counter!(
        "scimgate_scim_auth_total",
        "SCIM bearer token checks by result (success/invalid/missing/error)"
    );
    describe_counter!(
        "scimgate_scim_users_created_total",
        "Total number of users provisioned over SCIM"
    );
    describe_counter!(
        "scimgate_scim_child_failures_total",
        "Email or phone number rows skipped after a store failure"
    );

    counter!("scimgate_scim_auth_total", "result" => "success").absolute(0);
    counter!("scimgate_scim_users_created_total").absolute(0);
    counter!(
        "scimgate_scim_child_failures_total",
        "attribute" => "email",
        "operation" => "insert"
    )
    .absolute(0);
    gauge!("scimgate_http_requests_in_flight").set(0.0);
}
