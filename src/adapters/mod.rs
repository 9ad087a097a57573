// src/adapters/mod.rs
//! Source adapters: one upstream call in, normalized jobs (or a `FetchError`) out.

pub mod greenhouse;
pub mod http;
pub mod lever;
pub mod remotive;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::jobs::{NormalizedJob, Source};

pub use http::HttpBoardFetcher;

/// Remotive filters, passed through verbatim. Empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemotiveQuery {
    pub limit: Option<String>,
    pub search: Option<String>,
    pub company_name: Option<String>,
}

/// A single adapter call requested by one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Greenhouse(String),
    Lever(String),
    Remotive(RemotiveQuery),
}

impl Invocation {
    pub fn source(&self) -> Source {
        match self {
            Invocation::Greenhouse(_) => Source::Greenhouse,
            Invocation::Lever(_) => Source::Lever,
            Invocation::Remotive(_) => Source::Remotive,
        }
    }

    /// Human-readable label used as the prefix of failure strings.
    pub fn label(&self) -> String {
        match self {
            Invocation::Greenhouse(token) => format!("Greenhouse({token})"),
            Invocation::Lever(token) => format!("Lever({token})"),
            Invocation::Remotive(_) => "Remotive".to_string(),
        }
    }
}

/// Performs adapter invocations. `HttpBoardFetcher` is the production implementation;
/// tests plug in counting mocks.
#[async_trait]
pub trait BoardFetcher: Send + Sync {
    async fn fetch(&self, invocation: &Invocation) -> Result<Vec<NormalizedJob>, FetchError>;
}

/// Parse a full response body into `T`, failing the whole call on any mismatch.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    board: Source,
    body: &[u8],
) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|cause| FetchError::Decode { board, cause })
}

pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_name_source_and_token() {
        assert_eq!(
            Invocation::Greenhouse("airbnb".into()).label(),
            "Greenhouse(airbnb)"
        );
        assert_eq!(Invocation::Lever("robinhood".into()).label(), "Lever(robinhood)");
        assert_eq!(
            Invocation::Remotive(RemotiveQuery::default()).label(),
            "Remotive"
        );
    }
}
