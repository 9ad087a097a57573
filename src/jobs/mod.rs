// src/jobs/mod.rs
pub mod dedup;
pub mod types;

pub use dedup::{dedupe, JobKey};
pub use types::{AggregateResult, JobId, Meta, NormalizedJob, RawPosting, Source, TYPE_UNKNOWN};
