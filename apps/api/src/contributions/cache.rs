use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a fetched count is served before upstream is asked again.
pub const CACHE_TTL_MS: i64 = 3_600_000;

/// The payload served to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSnapshot {
    pub total_contributions: u64,
    /// ISO-8601, millisecond precision, UTC.
    pub fetched_at: String,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: ContributionSnapshot,
    cached_at: DateTime<Utc>,
}

/// Process-wide single-slot cache for the contribution count.
///
/// The lock only guards the slot's memory for the instant of a read or a
/// write; it is never held across the upstream call. Two requests that miss
/// at the same moment will both refresh and the last write wins. Both write
/// the same upstream value, so this is accepted rather than serialised.
#[derive(Debug, Clone)]
pub struct ContributionCache {
    slot: Arc<RwLock<Option<CacheEntry>>>,
    ttl: Duration,
}

impl Default for ContributionCache {
    fn default() -> Self {
        Self::new(Duration::milliseconds(CACHE_TTL_MS))
    }
}

impl ContributionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Returns the cached snapshot if it was stored strictly less than `ttl` before `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<ContributionSnapshot> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|entry| now - entry.cached_at < self.ttl)
            .map(|entry| entry.snapshot.clone())
    }

    /// Replaces the whole slot: value and timestamp change together.
    pub fn store(&self, snapshot: ContributionSnapshot, now: DateTime<Utc>) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CacheEntry {
            snapshot,
            cached_at: now,
        });
    }
}
