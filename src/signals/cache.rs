//! Timestamp-keyed evaluation cache.
//!
//! The invalidation policy lives entirely in this type: a cached result is
//! valid for any query timestamp `<=` the timestamp it was stored under.
//! Callers must pass monotonically non-decreasing timestamps, or the cache
//! will keep serving the stored result once the clock goes backward. A
//! content-hash policy could replace this type without touching the
//! aggregation logic around it.

use crate::signals::group::GroupResult;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct EvaluationCache {
    slot: Option<(GroupResult, DateTime<Utc>)>,
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached result, if one exists and is still fresh for
    /// `update_timestamp`.
    pub fn get(&self, update_timestamp: DateTime<Utc>) -> Option<&GroupResult> {
        self.slot
            .as_ref()
            .filter(|(_, cached_as_of)| update_timestamp <= *cached_as_of)
            .map(|(result, _)| result)
    }

    /// Replace the slot with a freshly computed result.
    pub fn store(&mut self, result: GroupResult, as_of: DateTime<Utc>) {
        self.slot = Some((result, as_of));
    }

    pub fn last_calculated(&self) -> Option<DateTime<Utc>> {
        self.slot.as_ref().map(|(_, as_of)| *as_of)
    }
}
