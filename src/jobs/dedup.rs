// src/jobs/dedup.rs
//! Cross-source deduplication over the merged fan-out output.

use std::collections::HashSet;

use super::types::{JobId, NormalizedJob, Source};

/// Identity of a posting: its url, or `(source, id)` when the url is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKey {
    Url(String),
    Native(Source, JobId),
}

impl JobKey {
    pub fn of(job: &NormalizedJob) -> Self {
        if job.url.is_empty() {
            JobKey::Native(job.source, job.id.clone())
        } else {
            JobKey::Url(job.url.clone())
        }
    }
}

/// Keep the first occurrence of every identity key, preserving order.
/// Returns the kept jobs and how many later duplicates were dropped.
pub fn dedupe(jobs: Vec<NormalizedJob>) -> (Vec<NormalizedJob>, usize) {
    let mut seen: HashSet<JobKey> = HashSet::with_capacity(jobs.len());
    let mut keep = Vec::with_capacity(jobs.len());
    let mut dropped = 0usize;

    for job in jobs {
        if !seen.insert(JobKey::of(&job)) {
            dropped += 1;
            continue;
        }
        keep.push(job);
    }

    (keep, dropped)
}
