// src/adapters/lever.rs
use reqwest::Url;

use super::{decode, or_default};
use crate::error::FetchError;
use crate::jobs::types::LeverRaw;
use crate::jobs::{JobId, NormalizedJob, RawPosting, Source, TYPE_UNKNOWN};

/// `{base}/v0/postings/{token}?mode=json`
pub fn endpoint(base: &str, token: &str) -> Result<Url, FetchError> {
    let bad = || FetchError::Url {
        board: Source::Lever,
        url: base.to_string(),
    };
    let mut url = Url::parse(base).map_err(|_| bad())?;
    url.path_segments_mut()
        .map_err(|_| bad())?
        .pop_if_empty()
        .extend(["v0", "postings", token]);
    url.query_pairs_mut().append_pair("mode", "json");
    Ok(url)
}

pub fn parse(token: &str, body: &[u8]) -> Result<Vec<NormalizedJob>, FetchError> {
    let postings: Vec<LeverRaw> = decode(Source::Lever, body)?;
    Ok(postings.into_iter().map(|raw| normalize(token, raw)).collect())
}

pub fn normalize(token: &str, raw: LeverRaw) -> NormalizedJob {
    let (location, commitment) = match &raw.categories {
        Some(c) => (c.location.clone(), c.commitment.clone()),
        None => (None, None),
    };

    NormalizedJob {
        source: Source::Lever,
        company: token.to_string(),
        id: JobId::Str(raw.id.clone()),
        title: raw.text.clone(),
        location: location.unwrap_or_default(),
        job_type: or_default(commitment, TYPE_UNKNOWN),
        url: raw.hosted_url.clone(),
        raw: RawPosting::Lever(raw),
    }
}
