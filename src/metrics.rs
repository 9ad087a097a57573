// src/metrics.rs
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and publish the configured cache TTL.
    pub fn init(cache_ttl_secs: u64) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        ensure_metrics_described();
        // Absolute TTL, no sliding refresh.
        gauge!("jobs_cache_ttl_secs").set(cache_ttl_secs as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("jobs_fetch_total", "Adapter invocations, by source.");
        describe_counter!(
            "jobs_fetch_errors_total",
            "Adapter invocations that failed (status, transport or decode), by source."
        );
        describe_counter!(
            "jobs_dedup_dropped_total",
            "Postings dropped as duplicates of an earlier url or (source, id)."
        );
        describe_counter!("jobs_cache_hits_total", "Requests served from a cached snapshot.");
        describe_counter!(
            "jobs_cache_misses_total",
            "Requests that triggered a fresh aggregation pass."
        );
        describe_histogram!("jobs_fanout_ms", "Wall-clock time of one fan-out in milliseconds.");
        describe_histogram!(
            "jobs_upstream_ms",
            "Upstream request time in milliseconds, by source."
        );
        describe_gauge!("jobs_cache_ttl_secs", "Configured snapshot TTL in seconds.");
    });
}
