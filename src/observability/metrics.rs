//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cep_lookups_total` (counter): lookups by outcome (won, timed_out, invalid_key)
//! - `cep_race_duration_seconds` (histogram): time from fan-out to decision
//! - `cep_provider_results_total` (counter): per-provider ok / failure kind
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing when the exporter is disabled.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

use crate::providers::ProviderResult;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_lookup(outcome: &'static str) {
    counter!("cep_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_race_duration(outcome: &'static str, elapsed: Duration) {
    histogram!("cep_race_duration_seconds", "outcome" => outcome).record(elapsed.as_secs_f64());
}

pub fn record_provider_result(provider: &str, result: &ProviderResult) {
    let label = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    counter!(
        "cep_provider_results_total",
        "provider" => provider.to_owned(),
        "result" => label
    )
    .increment(1);
}
