// src/aggregate.rs
//! Aggregation pipeline: cache check → fan-out → dedupe → cache store → paginate.
//!
//! `Aggregator` serves the multi-source endpoint, `LeverAggregator` the Lever-only
//! one. Each owns an independent `SnapshotCache`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use tracing::{debug, info};

use crate::adapters::{BoardFetcher, Invocation, RemotiveQuery};
use crate::cache::SnapshotCache;
use crate::config::{split_tokens, AggregatorConfig};
use crate::error::AggregateError;
use crate::fanout::fan_out;
use crate::jobs::{dedupe, AggregateResult, Meta};
use crate::paginate::{page_slice, total_pages, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// One page of the aggregated dataset plus how it was served.
#[derive(Debug, Clone)]
pub struct Served {
    pub result: AggregateResult,
    pub cache: CacheStatus,
}

/// Request parameters of the multi-source endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateParams {
    /// Empty means "use the configured boards".
    pub greenhouse_tokens: Vec<String>,
    pub lever_tokens: Vec<String>,
    pub remotive: RemotiveQuery,
    pub page: PageRequest,
    pub nocache: bool,
}

impl AggregateParams {
    pub fn from_query(q: &HashMap<String, String>) -> Self {
        let tokens = |key: &str| q.get(key).map(|v| split_tokens(v)).unwrap_or_default();
        let text = |key: &str| q.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            greenhouse_tokens: tokens("greenhouse_tokens"),
            lever_tokens: tokens("lever_tokens"),
            remotive: RemotiveQuery {
                limit: text("remotive_limit"),
                search: text("remotive_search"),
                company_name: text("remotive_company"),
            },
            page: PageRequest::parse(
                q.get("page").map(String::as_str),
                q.get("limit").map(String::as_str),
            ),
            nocache: q.contains_key("nocache"),
        }
    }

    /// One call per Greenhouse board, one per Lever board, then exactly one Remotive call.
    pub fn invocations(&self, cfg: &AggregatorConfig) -> Vec<Invocation> {
        let gh = if self.greenhouse_tokens.is_empty() {
            &cfg.greenhouse_tokens
        } else {
            &self.greenhouse_tokens
        };
        let lever = if self.lever_tokens.is_empty() {
            &cfg.lever_tokens
        } else {
            &self.lever_tokens
        };

        gh.iter()
            .cloned()
            .map(Invocation::Greenhouse)
            .chain(lever.iter().cloned().map(Invocation::Lever))
            .chain(std::iter::once(Invocation::Remotive(self.remotive.clone())))
            .collect()
    }
}

/// Request parameters of the Lever-only endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeverParams {
    pub companies: Vec<String>,
    pub page: PageRequest,
    pub nocache: bool,
}

impl LeverParams {
    pub fn from_query(q: &HashMap<String, String>) -> Self {
        Self {
            companies: q.get("company").map(|v| split_tokens(v)).unwrap_or_default(),
            page: PageRequest::parse(
                q.get("page").map(String::as_str),
                q.get("limit").map(String::as_str),
            ),
            nocache: q.contains_key("nocache"),
        }
    }
}

/// Multi-source aggregation endpoint (Greenhouse + Lever + Remotive).
pub struct Aggregator {
    fetcher: Arc<dyn BoardFetcher>,
    cache: SnapshotCache,
    cfg: Arc<AggregatorConfig>,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn BoardFetcher>, cfg: Arc<AggregatorConfig>) -> Self {
        crate::metrics::ensure_metrics_described();
        Self {
            fetcher,
            cache: SnapshotCache::new(),
            cfg,
        }
    }

    /// The read call exposed to UI callers: one page of deduplicated jobs with metadata.
    pub async fn fetch_aggregated_jobs(
        &self,
        params: &AggregateParams,
    ) -> Result<Served, AggregateError> {
        if let Some(snapshot) = self.cache.get(params.nocache) {
            return Ok(serve_hit(&snapshot, params.page));
        }

        let invocations = params.invocations(&self.cfg);
        let snapshot = refresh(
            &self.fetcher,
            &self.cache,
            invocations,
            ttl(&self.cfg),
            params.page,
        )
        .await?;
        Ok(serve_miss(&snapshot, params.page))
    }
}

/// Lever-only endpoint. Resolves companies before touching the cache.
pub struct LeverAggregator {
    fetcher: Arc<dyn BoardFetcher>,
    cache: SnapshotCache,
    cfg: Arc<AggregatorConfig>,
}

impl LeverAggregator {
    pub fn new(fetcher: Arc<dyn BoardFetcher>, cfg: Arc<AggregatorConfig>) -> Self {
        crate::metrics::ensure_metrics_described();
        Self {
            fetcher,
            cache: SnapshotCache::new(),
            cfg,
        }
    }

    pub async fn fetch_lever_jobs(&self, params: &LeverParams) -> Result<Served, AggregateError> {
        let companies = if params.companies.is_empty() {
            &self.cfg.lever_only_tokens
        } else {
            &params.companies
        };
        if companies.is_empty() {
            return Err(AggregateError::MissingLeverCompany);
        }

        if let Some(snapshot) = self.cache.get(params.nocache) {
            return Ok(serve_hit(&snapshot, params.page));
        }

        let invocations = companies.iter().cloned().map(Invocation::Lever).collect();
        let snapshot = refresh(
            &self.fetcher,
            &self.cache,
            invocations,
            ttl(&self.cfg),
            params.page,
        )
        .await?;
        Ok(serve_miss(&snapshot, params.page))
    }
}

fn ttl(cfg: &AggregatorConfig) -> Duration {
    Duration::from_secs(cfg.cache_ttl_secs)
}

/// Fetch everything, dedupe, and store the full set (page 1) as the new snapshot.
async fn refresh(
    fetcher: &Arc<dyn BoardFetcher>,
    cache: &SnapshotCache,
    invocations: Vec<Invocation>,
    ttl: Duration,
    req: PageRequest,
) -> Result<Arc<AggregateResult>, AggregateError> {
    counter!("jobs_cache_misses_total").increment(1);
    let t0 = std::time::Instant::now();
    let calls = invocations.len();

    let out = fan_out(Arc::clone(fetcher), invocations).await?;
    let (jobs, dropped) = dedupe(out.jobs);
    counter!("jobs_dedup_dropped_total").increment(dropped as u64);

    let total = jobs.len();
    info!(
        calls,
        kept = total,
        dropped,
        failures = out.failures.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "aggregation pass"
    );

    let snapshot = AggregateResult {
        jobs,
        meta: Meta {
            fetched_at: Utc::now(),
            count: total,
            failures: out.failures,
            total_jobs: total,
            total_pages: total_pages(total, req.limit),
            page: 1,
            limit: req.limit,
        },
    };
    Ok(cache.put(snapshot, ttl))
}

fn serve_hit(snapshot: &AggregateResult, req: PageRequest) -> Served {
    counter!("jobs_cache_hits_total").increment(1);
    debug!(page = req.page, limit = req.limit, "serving cached snapshot");
    Served {
        result: view(snapshot, req),
        cache: CacheStatus::Hit,
    }
}

fn serve_miss(snapshot: &AggregateResult, req: PageRequest) -> Served {
    Served {
        result: view(snapshot, req),
        cache: CacheStatus::Miss,
    }
}

/// Page view over a full snapshot. Pass-level fields (fetched_at, failures) carry over.
pub fn view(snapshot: &AggregateResult, req: PageRequest) -> AggregateResult {
    let jobs = page_slice(&snapshot.jobs, req).to_vec();
    let total = snapshot.jobs.len();
    AggregateResult {
        meta: Meta {
            fetched_at: snapshot.meta.fetched_at,
            count: jobs.len(),
            failures: snapshot.meta.failures.clone(),
            total_jobs: total,
            total_pages: total_pages(total, req.limit),
            page: req.page,
            limit: req.limit,
        },
        jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_overrides_fall_back_to_config() {
        let cfg = AggregatorConfig::default();
        let params = AggregateParams::from_query(&query(&[
            ("greenhouse_tokens", "acme"),
            ("lever_tokens", ""),
            ("remotive_company", "acme"),
        ]));
        let invs = params.invocations(&cfg);
        assert_eq!(
            invs,
            vec![
                Invocation::Greenhouse("acme".into()),
                Invocation::Lever("lever".into()),
                Invocation::Lever("robinhood".into()),
                Invocation::Remotive(RemotiveQuery {
                    limit: None,
                    search: None,
                    company_name: Some("acme".into()),
                }),
            ]
        );
    }

    #[test]
    fn nocache_is_presence_based() {
        assert!(AggregateParams::from_query(&query(&[("nocache", "")])).nocache);
        assert!(AggregateParams::from_query(&query(&[("nocache", "1")])).nocache);
        assert!(!AggregateParams::from_query(&query(&[])).nocache);
    }

    #[test]
    fn lever_params_split_company() {
        let p = LeverParams::from_query(&query(&[("company", " acme "), ("limit", "0")]));
        assert_eq!(p.companies, vec!["acme"]);
        assert_eq!(p.page, PageRequest::default());
    }
}
