// src/cache.rs
//! In-memory snapshot cache for one aggregation endpoint.
//!
//! Holds the last full deduplicated dataset with an absolute expiry (no sliding
//! refresh). Writes replace the whole snapshot; the last writer wins.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::jobs::AggregateResult;

// Cap for absurd TTLs so `Instant` arithmetic cannot overflow.
const FOREVER: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

#[derive(Debug)]
struct CacheEntry {
    expires_at: Instant,
    data: Arc<AggregateResult>,
}

#[derive(Debug, Default)]
pub struct SnapshotCache {
    inner: RwLock<Option<CacheEntry>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored snapshot if it is still fresh. `bypass` forces a miss.
    pub fn get(&self, bypass: bool) -> Option<Arc<AggregateResult>> {
        self.get_at(Instant::now(), bypass)
    }

    pub fn get_at(&self, now: Instant, bypass: bool) -> Option<Arc<AggregateResult>> {
        if bypass {
            return None;
        }
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|e| now < e.expires_at)
            .map(|e| Arc::clone(&e.data))
    }

    /// Replace the snapshot wholesale; it stays fresh for `ttl`.
    pub fn put(&self, result: AggregateResult, ttl: Duration) -> Arc<AggregateResult> {
        self.put_at(Instant::now(), result, ttl)
    }

    pub fn put_at(&self, now: Instant, result: AggregateResult, ttl: Duration) -> Arc<AggregateResult> {
        let data = Arc::new(result);
        let entry = CacheEntry {
            expires_at: now.checked_add(ttl).unwrap_or_else(|| now + FOREVER),
            data: Arc::clone(&data),
        };
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
        data
    }
}
