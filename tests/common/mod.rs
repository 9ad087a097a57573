// tests/common/mod.rs
//! Counting mock fetcher and job builders shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use job_board_aggregator::adapters::{BoardFetcher, Invocation};
use job_board_aggregator::error::FetchError;
use job_board_aggregator::jobs::types::{GreenhouseRaw, LeverRaw, RemotiveRaw};
use job_board_aggregator::jobs::{JobId, NormalizedJob, RawPosting, Source};

#[derive(Clone)]
pub enum Reply {
    Jobs(Vec<NormalizedJob>),
    Status(u16),
    Malformed,
}

/// Replies keyed by invocation label (`Greenhouse(acme)`, `Lever(x)`, `Remotive`).
/// Unknown labels answer with an empty board.
#[derive(Default)]
pub struct MockFetcher {
    replies: HashMap<String, Reply>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Invocation>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, label: &str, reply: Reply) -> Self {
        self.replies.insert(label.to_string(), reply);
        self
    }

    /// Total adapter invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Invocation> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoardFetcher for MockFetcher {
    async fn fetch(&self, inv: &Invocation) -> Result<Vec<NormalizedJob>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(inv.clone());

        let board = inv.source();
        match self.replies.get(&inv.label()) {
            None => Ok(Vec::new()),
            Some(Reply::Jobs(jobs)) => Ok(jobs.clone()),
            Some(Reply::Status(code)) => Err(FetchError::Status {
                board,
                status: StatusCode::from_u16(*code).unwrap(),
            }),
            Some(Reply::Malformed) => Err(FetchError::Decode {
                board,
                cause: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            }),
        }
    }
}

pub fn greenhouse_job(token: &str, id: i64, url: &str) -> NormalizedJob {
    NormalizedJob {
        source: Source::Greenhouse,
        company: token.into(),
        id: JobId::Int(id),
        title: format!("{token} role {id}"),
        location: "Remote".into(),
        job_type: "Full-time".into(),
        url: url.into(),
        raw: RawPosting::Greenhouse(GreenhouseRaw {
            id,
            title: format!("{token} role {id}"),
            location: None,
            absolute_url: url.into(),
            metadata: None,
            extra: Default::default(),
        }),
    }
}

pub fn lever_job(token: &str, id: &str) -> NormalizedJob {
    let url = format!("https://jobs.lever.co/{token}/{id}");
    NormalizedJob {
        source: Source::Lever,
        company: token.into(),
        id: JobId::Str(id.into()),
        title: format!("{token} posting {id}"),
        location: String::new(),
        job_type: "N/A".into(),
        url: url.clone(),
        raw: RawPosting::Lever(LeverRaw {
            id: id.into(),
            text: format!("{token} posting {id}"),
            hosted_url: url,
            categories: None,
            extra: Default::default(),
        }),
    }
}

pub fn remotive_job(company: &str, id: i64, url: &str) -> NormalizedJob {
    NormalizedJob {
        source: Source::Remotive,
        company: company.into(),
        id: JobId::Int(id),
        title: format!("remote {id}"),
        location: "Worldwide".into(),
        job_type: "full_time".into(),
        url: url.into(),
        raw: RawPosting::Remotive(RemotiveRaw {
            id: JobId::Int(id),
            title: format!("remote {id}"),
            company_name: company.into(),
            url: url.into(),
            candidate_required_location: Some("Worldwide".into()),
            job_type: Some("full_time".into()),
            extra: Default::default(),
        }),
    }
}

/// `n` Greenhouse jobs for `token`, ids starting at 1.
pub fn greenhouse_board(token: &str, n: usize) -> Vec<NormalizedJob> {
    (1..=n as i64)
        .map(|id| {
            greenhouse_job(
                token,
                id,
                &format!("https://boards.greenhouse.io/{token}/jobs/{id}"),
            )
        })
        .collect()
}

pub fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
