//! Metrics collection and exposition.
//!
//! # Metrics
//! - `admatch_http_requests_total` (counter): requests by method, route, status
//! - `admatch_http_request_duration_seconds` (histogram): handler latency
//! - `admatch_index_cache_lookups_total` (counter): result=hit|miss
//! - `admatch_index_builds_total` (counter): index rebuilds
//! - `admatch_index_platforms` / `admatch_index_nodes` (gauges): current size
//! - `admatch_feed_records_total` (counter): outcome=loaded|skipped
//!
//! Recording without an installed exporter is a no-op, so library code may
//! record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let method = method.to_owned();
    let status = status.to_string();
    let route = route.to_owned();

    ::metrics::counter!(
        "admatch_http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.clone()
    )
    .increment(1);
    ::metrics::histogram!(
        "admatch_http_request_duration_seconds",
        "method" => method,
        "route" => route,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    ::metrics::counter!("admatch_index_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_index_build(platforms: usize, nodes: usize) {
    ::metrics::counter!("admatch_index_builds_total").increment(1);
    ::metrics::gauge!("admatch_index_platforms").set(platforms as f64);
    ::metrics::gauge!("admatch_index_nodes").set(nodes as f64);
}

pub fn record_feed_records(loaded: usize, skipped: usize) {
    ::metrics::counter!("admatch_feed_records_total", "outcome" => "loaded").increment(loaded as u64);
    ::metrics::counter!("admatch_feed_records_total", "outcome" => "skipped").increment(skipped as u64);
}
