// src/jobs/types.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used when an upstream board does not report an employment type.
pub const TYPE_UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Greenhouse,
    Lever,
    Remotive,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Greenhouse => "greenhouse",
            Source::Lever => "lever",
            Source::Remotive => "remotive",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-native posting id. Greenhouse and Remotive use integers, Lever uses UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Int(i64),
    Str(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Int(n) => write!(f, "{n}"),
            JobId::Str(s) => f.write_str(s),
        }
    }
}

// ---- Upstream records ----
// Each keeps the fields the mapping needs and carries everything else in `extra`,
// so `raw` serializes back to the unmodified upstream object.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenhouseRaw {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GreenhouseLocation>,
    pub absolute_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<GreenhouseMetadata>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenhouseLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenhouseMetadata {
    pub name: String,
    // Greenhouse metadata values may be strings, lists or null.
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverRaw {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub hosted_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<LeverCategories>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverCategories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotiveRaw {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_required_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The unmodified upstream record, resolved to its source at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPosting {
    Greenhouse(GreenhouseRaw),
    Lever(LeverRaw),
    Remotive(RemotiveRaw),
}

/// Canonical job record produced by every adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJob {
    pub source: Source,
    pub company: String,
    pub id: JobId,
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub url: String,
    pub raw: RawPosting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub fetched_at: DateTime<Utc>,
    pub count: usize,
    pub failures: Vec<String>,
    pub total_jobs: usize,
    pub total_pages: usize,
    pub page: usize,
    pub limit: usize,
}

/// Response body shared by the aggregation endpoints (and the cache payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub jobs: Vec<NormalizedJob>,
    pub meta: Meta,
}
