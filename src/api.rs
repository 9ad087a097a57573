// src/api.rs
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::adapters::{BoardFetcher, HttpBoardFetcher};
use crate::aggregate::{AggregateParams, Aggregator, LeverAggregator, LeverParams, Served};
use crate::config::AggregatorConfig;
use crate::error::AggregateError;

/// `HIT` when served from the snapshot cache, `MISS` after a fresh pass.
pub const CACHE_HEADER: &str = "x-cache";

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub lever: Arc<LeverAggregator>,
}

impl AppState {
    /// Production wiring: HTTP adapters built from config.
    pub fn from_config(cfg: AggregatorConfig) -> anyhow::Result<Self> {
        let fetcher = HttpBoardFetcher::from_config(&cfg)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), cfg))
    }

    /// Both endpoints share the fetcher but never a cache.
    pub fn with_fetcher(fetcher: Arc<dyn BoardFetcher>, cfg: AggregatorConfig) -> Self {
        let cfg = Arc::new(cfg);
        Self {
            aggregator: Arc::new(Aggregator::new(Arc::clone(&fetcher), Arc::clone(&cfg))),
            lever: Arc::new(LeverAggregator::new(fetcher, cfg)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/jobs", get(aggregated_jobs))
        // Path the existing UI calls.
        .route("/api/greenhouse/jobs", get(aggregated_jobs))
        .route("/api/lever/jobs", get(lever_jobs))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn aggregated_jobs(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let params = AggregateParams::from_query(&q);
    let served = state.aggregator.fetch_aggregated_jobs(&params).await?;
    Ok(respond(served))
}

async fn lever_jobs(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let params = LeverParams::from_query(&q);
    let served = state.lever.fetch_lever_jobs(&params).await?;
    Ok(respond(served))
}

fn respond(served: Served) -> Response {
    ([(CACHE_HEADER, served.cache.as_str())], Json(served.result)).into_response()
}

pub struct ApiError(AggregateError);

impl From<AggregateError> for ApiError {
    fn from(e: AggregateError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AggregateError::MissingLeverCompany => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": AggregateError::MissingLeverCompany.to_string() })),
            )
                .into_response(),
            AggregateError::Internal(e) => {
                tracing::error!(error = ?e, "aggregation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal error", "details": format!("{e:#}") })),
                )
                    .into_response()
            }
        }
    }
}
