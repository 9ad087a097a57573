// src/lib.rs
// Public library surface for integration tests (and the UI-facing read call).

pub mod adapters;
pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fanout;
pub mod jobs;
pub mod metrics;
pub mod paginate;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{AggregateParams, Aggregator, LeverAggregator, LeverParams, Served};
pub use crate::api::{create_router, AppState};
pub use crate::config::AggregatorConfig;
pub use crate::jobs::{AggregateResult, Meta, NormalizedJob};

use axum::Router;

/// Build the full router from config (HTTP adapters, fresh caches). No metrics route.
pub fn app(cfg: AggregatorConfig) -> anyhow::Result<Router> {
    let state = AppState::from_config(cfg)?;
    Ok(create_router(state))
}
