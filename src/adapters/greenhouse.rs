// src/adapters/greenhouse.rs
use reqwest::Url;
use serde::Deserialize;

use super::{decode, or_default};
use crate::error::FetchError;
use crate::jobs::types::GreenhouseRaw;
use crate::jobs::{JobId, NormalizedJob, RawPosting, Source, TYPE_UNKNOWN};

const EMPLOYMENT_TYPE: &str = "Employment Type";

#[derive(Debug, Deserialize)]
struct Board {
    jobs: Vec<GreenhouseRaw>,
}

/// `{base}/v1/boards/{token}/jobs`
pub fn endpoint(base: &str, token: &str) -> Result<Url, FetchError> {
    let bad = || FetchError::Url {
        board: Source::Greenhouse,
        url: base.to_string(),
    };
    let mut url = Url::parse(base).map_err(|_| bad())?;
    url.path_segments_mut()
        .map_err(|_| bad())?
        .pop_if_empty()
        .extend(["v1", "boards", token, "jobs"]);
    Ok(url)
}

pub fn parse(token: &str, body: &[u8]) -> Result<Vec<NormalizedJob>, FetchError> {
    let board: Board = decode(Source::Greenhouse, body)?;
    Ok(board.jobs.into_iter().map(|raw| normalize(token, raw)).collect())
}

pub fn normalize(token: &str, raw: GreenhouseRaw) -> NormalizedJob {
    let location = raw
        .location
        .as_ref()
        .and_then(|l| l.name.clone())
        .unwrap_or_default();
    let job_type = employment_type(&raw);

    NormalizedJob {
        source: Source::Greenhouse,
        company: token.to_string(),
        id: JobId::Int(raw.id),
        title: raw.title.clone(),
        location,
        job_type,
        url: raw.absolute_url.clone(),
        raw: RawPosting::Greenhouse(raw),
    }
}

fn employment_type(raw: &GreenhouseRaw) -> String {
    let value = raw
        .metadata
        .iter()
        .flatten()
        .find(|m| m.name == EMPLOYMENT_TYPE)
        .map(|m| &m.value);

    match value {
        Some(serde_json::Value::String(s)) => or_default(Some(s.clone()), TYPE_UNKNOWN),
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            or_default(Some(parts.join(", ")), TYPE_UNKNOWN)
        }
        // Objects, numbers and booleans carry no usable label.
        Some(_) | None => TYPE_UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "jobs": [
            {
                "id": 101,
                "title": "Backend Engineer",
                "location": {"name": "Remote - US"},
                "absolute_url": "https://boards.greenhouse.io/acme/jobs/101",
                "updated_at": "2024-05-01T10:00:00-04:00",
                "metadata": [
                    {"id": 1, "name": "Team", "value": "Platform"},
                    {"id": 2, "name": "Employment Type", "value": "Full-time"}
                ]
            },
            {
                "id": 102,
                "title": "Designer",
                "absolute_url": "https://boards.greenhouse.io/acme/jobs/102"
            }
        ]
    }"#;

    #[test]
    fn maps_fields_and_defaults() {
        let jobs = parse("acme", BODY.as_bytes()).unwrap();
        assert_eq!(jobs.len(), 2);

        let a = &jobs[0];
        assert_eq!(a.source, Source::Greenhouse);
        assert_eq!(a.company, "acme");
        assert_eq!(a.id, JobId::Int(101));
        assert_eq!(a.location, "Remote - US");
        assert_eq!(a.job_type, "Full-time");
        assert_eq!(a.url, "https://boards.greenhouse.io/acme/jobs/101");

        let b = &jobs[1];
        assert_eq!(b.location, "");
        assert_eq!(b.job_type, TYPE_UNKNOWN);
    }

    #[test]
    fn raw_keeps_unknown_fields() {
        let jobs = parse("acme", BODY.as_bytes()).unwrap();
        let raw = serde_json::to_value(&jobs[0].raw).unwrap();
        assert_eq!(raw["updated_at"], "2024-05-01T10:00:00-04:00");
        assert_eq!(raw["metadata"][0]["value"], "Platform");
    }

    #[test]
    fn one_malformed_posting_fails_the_call() {
        let body = r#"{"jobs": [{"id": 1, "title": "ok", "absolute_url": "u"}, {"title": "no id"}]}"#;
        let err = parse("acme", body.as_bytes()).unwrap_err();
        assert!(matches!(err, FetchError::Decode { board: Source::Greenhouse, .. }));
    }

    #[test]
    fn non_text_employment_type_is_unknown() {
        let body = r#"{"jobs": [
            {"id": 1, "title": "a", "absolute_url": "u1",
             "metadata": [{"name": "Employment Type", "value": {"a": 1}}]},
            {"id": 2, "title": "b", "absolute_url": "u2",
             "metadata": [{"name": "Employment Type", "value": 40}]},
            {"id": 3, "title": "c", "absolute_url": "u3",
             "metadata": [{"name": "Employment Type", "value": ["Full-time", "Contract"]}]}
        ]}"#;
        let jobs = parse("acme", body.as_bytes()).unwrap();
        assert_eq!(jobs[0].job_type, TYPE_UNKNOWN);
        assert_eq!(jobs[1].job_type, TYPE_UNKNOWN);
        assert_eq!(jobs[2].job_type, "Full-time, Contract");
    }

    #[test]
    fn endpoint_encodes_token() {
        let url = endpoint("https://boards-api.greenhouse.io", "a b/c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://boards-api.greenhouse.io/v1/boards/a%20b%2Fc/jobs"
        );
    }
}
