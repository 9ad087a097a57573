// tests/metrics_route.rs
//
// The Prometheus recorder is process-global, so this file holds a single test.

mod common;

use std::sync::Arc;

use axum::body::{self, Body};
use http::{Request, StatusCode};
use tower::ServiceExt as _;

use common::{greenhouse_board, MockFetcher, Reply};
use job_board_aggregator::adapters::BoardFetcher;
use job_board_aggregator::metrics::Metrics;
use job_board_aggregator::{create_router, AggregatorConfig, AppState};

#[tokio::test]
async fn metrics_expose_cache_and_dedup_series() {
    let metrics = Metrics::init(300).expect("install recorder");

    let fetcher: Arc<dyn BoardFetcher> = Arc::new(
        MockFetcher::new()
            .reply("Greenhouse(airbnb)", Reply::Status(503))
            .reply("Greenhouse(stripe)", Reply::Jobs(greenhouse_board("stripe", 2)))
            .reply("Lever(lever)", Reply::Jobs(Vec::new())),
    );
    let app = create_router(AppState::with_fetcher(fetcher, AggregatorConfig::default()))
        .merge(metrics.router());

    for _ in 0..2 {
        let req = Request::builder()
            .uri("/api/jobs")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("jobs_cache_misses_total 1"), "{text}");
    assert!(text.contains("jobs_cache_hits_total 1"), "{text}");
    assert!(text.contains("jobs_fetch_errors_total{source=\"greenhouse\"} 1"), "{text}");
    assert!(text.contains("jobs_cache_ttl_secs 300"), "{text}");
}
