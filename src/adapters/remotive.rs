// src/adapters/remotive.rs
use reqwest::Url;
use serde::Deserialize;

use super::{decode, or_default, RemotiveQuery};
use crate::error::FetchError;
use crate::jobs::types::RemotiveRaw;
use crate::jobs::{NormalizedJob, RawPosting, Source, TYPE_UNKNOWN};

#[derive(Debug, Deserialize)]
struct Listing {
    jobs: Vec<RemotiveRaw>,
}

/// `{base}/api/remote-jobs?limit=&search=&company_name=`, sending only non-empty filters.
pub fn endpoint(base: &str, query: &RemotiveQuery) -> Result<Url, FetchError> {
    let bad = || FetchError::Url {
        board: Source::Remotive,
        url: base.to_string(),
    };
    let mut url = Url::parse(base).map_err(|_| bad())?;
    url.path_segments_mut()
        .map_err(|_| bad())?
        .pop_if_empty()
        .extend(["api", "remote-jobs"]);

    let filters = [
        ("limit", &query.limit),
        ("search", &query.search),
        ("company_name", &query.company_name),
    ];
    if filters.iter().any(|(_, v)| v.as_deref().is_some_and(|s| !s.is_empty())) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in filters {
            if let Some(v) = value.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair(key, v);
            }
        }
    }
    Ok(url)
}

pub fn parse(body: &[u8]) -> Result<Vec<NormalizedJob>, FetchError> {
    let listing: Listing = decode(Source::Remotive, body)?;
    Ok(listing.jobs.into_iter().map(normalize).collect())
}

pub fn normalize(raw: RemotiveRaw) -> NormalizedJob {
    NormalizedJob {
        source: Source::Remotive,
        company: raw.company_name.clone(),
        id: raw.id.clone(),
        title: raw.title.clone(),
        location: raw.candidate_required_location.clone().unwrap_or_default(),
        job_type: or_default(raw.job_type.clone(), TYPE_UNKNOWN),
        url: raw.url.clone(),
        raw: RawPosting::Remotive(raw),
    }
}
