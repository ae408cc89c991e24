//! The multi-timeframe trading framework: timeframe lifecycle, staleness
//! tracking, and the two nested levels of majority-vote aggregation.

pub mod backtest;

use crate::indicators;
use crate::models::strategy::{IndicatorSpec, StrategySpec};
use crate::models::table::SeriesTable;
use crate::models::verdict::{Verdict, VoteTally};
use crate::signals::group::{GroupResult, SignalGroup};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Outcome of a lifecycle operation. Absence of a named timeframe or group
/// is never fatal; it is reported here and logged, and the operation is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    Done,
    NotFound,
    Skipped,
}

/// A named granularity of market observation: its data, indicator strategy,
/// signal groups, and the two timestamps the staleness test compares.
pub struct Timeframe {
    pub name: String,
    pub data: SeriesTable,
    pub signal_groups: Vec<SignalGroup>,
    pub strategy: Option<StrategySpec>,
    pub last_update: DateTime<Utc>,
    pub last_calculation: DateTime<Utc>,
}

/// The evaluation result for one timeframe: every group's result keyed by
/// group name, plus the timeframe-level majority verdict.
#[derive(Debug, Clone, Serialize)]
pub struct TimeframeReport {
    pub groups: BTreeMap<String, GroupResult>,
    pub overall: Verdict,
}

/// Owns every timeframe record (and, transitively, every signal group and
/// signal). Evaluation is synchronous and explicitly driven; exactly one
/// evaluation is in flight at a time.
pub struct TradingFramework {
    pub name: String,
    timeframes: Vec<Timeframe>,
    active_time_frame: Option<String>,
    pub bias_timeframes: Vec<String>,
    pub confirmation_timeframes: Vec<String>,
}

impl TradingFramework {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeframes: Vec::new(),
            active_time_frame: None,
            bias_timeframes: Vec::new(),
            confirmation_timeframes: Vec::new(),
        }
    }

    pub fn with_roles(mut self, bias: Vec<String>, confirmation: Vec<String>) -> Self {
        self.bias_timeframes = bias;
        self.confirmation_timeframes = confirmation;
        self
    }

    fn current_timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.timeframes.iter().position(|tf| tf.name == name)
    }

    pub fn timeframe(&self, name: &str) -> Option<&Timeframe> {
        self.position(name).map(|idx| &self.timeframes[idx])
    }

    pub fn timeframe_names(&self) -> Vec<String> {
        self.timeframes.iter().map(|tf| tf.name.clone()).collect()
    }

    pub fn active_time_frame(&self) -> Option<&str> {
        self.active_time_frame.as_deref()
    }

    /// Register a timeframe or replace an existing one's data.
    ///
    /// A new name gets the given strategy (or a generated default) applied
    /// to its data and an empty signal-group list. An existing name keeps
    /// its signal groups; the explicitly passed strategy, or failing that
    /// the stored one, is re-applied to the new data. Either way
    /// `last_update` is stamped, which marks the timeframe stale.
    pub fn add_timeframe(&mut self, name: &str, mut data: SeriesTable, strategy: Option<StrategySpec>) {
        let now = self.current_timestamp();
        match self.position(name) {
            Some(idx) => {
                let current = strategy.or_else(|| self.timeframes[idx].strategy.clone());
                match current {
                    Some(spec) => {
                        indicators::apply_strategy(&mut data, &spec);
                        self.timeframes[idx].strategy = Some(spec);
                    }
                    None => {
                        warn!(timeframe = name, "no strategy defined for updating timeframe");
                    }
                }
                self.timeframes[idx].data = data;
                self.timeframes[idx].last_update = now;
            }
            None => {
                let spec = strategy.unwrap_or_else(|| StrategySpec::default_for(name));
                indicators::apply_strategy(&mut data, &spec);
                self.timeframes.push(Timeframe {
                    name: name.to_string(),
                    data,
                    signal_groups: Vec::new(),
                    strategy: Some(spec),
                    last_update: now,
                    last_calculation: DateTime::<Utc>::MIN_UTC,
                });
            }
        }
    }

    /// Staleness test: the underlying data was refreshed after the last
    /// full evaluation. Unknown names are not stale.
    pub fn needs_update(&self, name: &str) -> bool {
        self.timeframe(name)
            .map(|tf| tf.last_update > tf.last_calculation)
            .unwrap_or(false)
    }

    /// Replace a timeframe's strategy with a custom indicator list.
    pub fn update_strategy(&mut self, name: &str, indicators: Vec<IndicatorSpec>) -> OpStatus {
        match self.position(name) {
            Some(idx) => {
                self.timeframes[idx].strategy =
                    Some(StrategySpec::new(format!("{name} Custom Strategy"), indicators));
                OpStatus::Done
            }
            None => {
                warn!(timeframe = name, "timeframe does not exist, add it first");
                OpStatus::NotFound
            }
        }
    }

    /// Re-apply the stored strategy to a timeframe's data.
    pub fn apply_strategy(&mut self, name: &str) -> OpStatus {
        match self.position(name) {
            Some(idx) => {
                let tf = &mut self.timeframes[idx];
                match tf.strategy.clone() {
                    Some(spec) => {
                        indicators::apply_strategy(&mut tf.data, &spec);
                        OpStatus::Done
                    }
                    None => {
                        warn!(timeframe = name, "timeframe has no strategy to apply");
                        OpStatus::Skipped
                    }
                }
            }
            None => {
                warn!(timeframe = name, "strategy or timeframe does not exist");
                OpStatus::NotFound
            }
        }
    }

    pub fn delete_timeframe(&mut self, name: &str) -> OpStatus {
        match self.position(name) {
            Some(idx) => {
                self.timeframes.remove(idx);
                OpStatus::Done
            }
            None => {
                warn!(timeframe = name, "timeframe does not exist");
                OpStatus::NotFound
            }
        }
    }

    pub fn add_signal_group_to_timeframe(&mut self, name: &str, group: SignalGroup) -> OpStatus {
        match self.position(name) {
            Some(idx) => {
                self.timeframes[idx].signal_groups.push(group);
                OpStatus::Done
            }
            None => {
                warn!(timeframe = name, "timeframe does not exist");
                OpStatus::NotFound
            }
        }
    }

    pub fn remove_signal_group_from_timeframe(&mut self, name: &str, group_name: &str) -> OpStatus {
        match self.position(name) {
            Some(idx) => {
                self.timeframes[idx]
                    .signal_groups
                    .retain(|group| group.name() != group_name);
                OpStatus::Done
            }
            None => {
                warn!(timeframe = name, "timeframe does not exist");
                OpStatus::NotFound
            }
        }
    }

    pub fn set_active_time_frame(&mut self, name: &str) -> OpStatus {
        match self.position(name) {
            Some(_) => {
                self.active_time_frame = Some(name.to_string());
                OpStatus::Done
            }
            None => {
                warn!(timeframe = name, "timeframe does not exist");
                OpStatus::NotFound
            }
        }
    }

    /// Evaluate one timeframe: recompute indicators if stale, evaluate every
    /// signal group against the timeframe's recalculation timestamp, and
    /// aggregate the group verdicts by plurality (tie resolves to neutral).
    ///
    /// Returns None (after logging) for an unknown name.
    pub fn evaluate_timeframe(&mut self, name: &str) -> Option<TimeframeReport> {
        let Some(idx) = self.position(name) else {
            warn!(timeframe = name, "timeframe does not exist");
            return None;
        };

        if self.needs_update(name) {
            debug!(timeframe = name, "timeframe is stale, reapplying strategy");
            let now = self.current_timestamp();
            self.apply_strategy(name);
            self.timeframes[idx].last_calculation = now;
        }

        let tf = &mut self.timeframes[idx];
        let data = &tf.data;
        let last_calculation = tf.last_calculation;

        let mut groups = BTreeMap::new();
        let mut tally = VoteTally::default();
        for group in tf.signal_groups.iter_mut() {
            // Group caches key off the timeframe's recalculation time, not
            // any per-group clock.
            let result = group.evaluate_group(data, last_calculation);
            tally.record(result.overall);
            groups.insert(group.name().to_string(), result);
        }

        Some(TimeframeReport {
            groups,
            overall: tally.plurality(),
        })
    }

    /// Evaluate every registered timeframe independently.
    pub fn evaluate_all_timeframes(&mut self) -> BTreeMap<String, TimeframeReport> {
        let names = self.timeframe_names();
        names
            .into_iter()
            .filter_map(|name| {
                let report = self.evaluate_timeframe(&name)?;
                Some((name, report))
            })
            .collect()
    }

    /// Cross-timeframe overall status: one vote per named bias timeframe,
    /// one per named confirmation timeframe, and one for the active
    /// timeframe's own verdict when set. Unknown names cast no vote.
    /// Resolution is strict majority over total votes cast; neutral votes
    /// count toward the total, and anything short of a strict majority is
    /// neutral.
    pub fn determine_overall_status(&mut self, bias: &[String], confirmation: &[String]) -> Verdict {
        let mut tally = VoteTally::default();

        for name in bias.iter().chain(confirmation.iter()) {
            if self.position(name).is_none() {
                continue;
            }
            if let Some(report) = self.evaluate_timeframe(name) {
                tally.record(report.overall);
            }
        }

        if let Some(active) = self.active_time_frame.clone() {
            if self.position(&active).is_some() {
                if let Some(report) = self.evaluate_timeframe(&active) {
                    tally.record(report.overall);
                }
            }
        }

        tally.strict_majority()
    }
}
