//! Job board aggregator: binary entrypoint.
//! Boots the Axum HTTP server: config, tracing, metrics, and the aggregation routes.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use job_board_aggregator::{metrics::Metrics, AggregatorConfig};

/// Compact logs by default, JSON lines with LOG_FORMAT=json.
/// A no-op when the hosting runtime already installed a subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("job_board_aggregator=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AggregatorConfig::load().context("loading aggregator config")?;
    info!(
        greenhouse = ?cfg.greenhouse_tokens,
        lever = ?cfg.lever_tokens,
        ttl_secs = cfg.cache_ttl_secs,
        "aggregator config loaded"
    );

    let metrics = Metrics::init(cfg.cache_ttl_secs)?;
    let router = job_board_aggregator::app(cfg)?.merge(metrics.router());

    Ok(router.into())
}
