//! Signal groups: ordered signals aggregated by majority vote, with a
//! staleness-aware result cache.

use crate::models::table::SeriesTable;
use crate::models::verdict::{Verdict, VoteTally};
use crate::signals::cache::EvaluationCache;
use crate::signals::signal::Signal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// The result of one group evaluation: every member verdict keyed by signal
/// name, plus the group-level majority verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupResult {
    pub signals: BTreeMap<String, Verdict>,
    pub overall: Verdict,
}

pub struct SignalGroup {
    name: String,
    signals: Vec<Signal>,
    cache: EvaluationCache,
}

impl SignalGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signals: Vec::new(),
            cache: EvaluationCache::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Append a signal. Duplicate names are accepted; results are keyed by
    /// name, so the last-registered duplicate wins.
    pub fn add_signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn last_calculated(&self) -> Option<DateTime<Utc>> {
        self.cache.last_calculated()
    }

    /// Evaluate every member signal and aggregate the verdicts.
    ///
    /// A cached result stored under a timestamp `>= update_timestamp` is
    /// returned unchanged without re-invoking any member signal. On a miss,
    /// positives and negatives among the member verdicts are counted and the
    /// larger side wins; a tie (including an empty group) is neutral. The
    /// fresh result is stored under `update_timestamp`.
    pub fn evaluate_group(
        &mut self,
        table: &SeriesTable,
        update_timestamp: DateTime<Utc>,
    ) -> GroupResult {
        if let Some(cached) = self.cache.get(update_timestamp) {
            return cached.clone();
        }

        let mut signals = BTreeMap::new();
        for signal in &self.signals {
            signals.insert(signal.name().to_string(), signal.evaluate(table));
        }

        let tally: VoteTally = signals.values().copied().collect();
        let result = GroupResult {
            overall: tally.plurality(),
            signals,
        };

        self.cache.store(result.clone(), update_timestamp);
        result
    }
}
