//! Generic scoring primitive: one declarative rule, one verdict from the
//! latest row of a table.

use crate::models::table::SeriesTable;
use crate::models::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// A single evaluation rule over a table column.
///
/// With a `signal_line` the rule runs in crossover mode, comparing the
/// latest target value to the latest signal-line value within a tolerance.
/// Without one it runs in threshold mode against `threshold_up` /
/// `threshold_down`, with an optional neutral band. Either way, only the
/// table's most recent observation is consulted, and missing data (absent
/// column, empty table, NaN latest value) yields a neutral verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSpec {
    /// Target column to score.
    pub column: String,
    /// Crossover comparison column; selects crossover mode when present.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signal_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub threshold_up: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub threshold_down: Option<f64>,
    /// Crossover neutral-zone half-width; zero when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tolerance: Option<f64>,
    /// Threshold-mode neutral band (lower, upper).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub neutral_band: Option<(f64, f64)>,
    /// Flip the verdict of a fired comparison.
    #[serde(default)]
    pub inverted: bool,
}

impl ScoreSpec {
    /// A crossover rule: `column` against `signal_line`.
    pub fn crossover(column: impl Into<String>, signal_line: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            signal_line: Some(signal_line.into()),
            threshold_up: None,
            threshold_down: None,
            tolerance: None,
            neutral_band: None,
            inverted: false,
        }
    }

    /// A threshold rule: `column` against an upper and lower bound.
    pub fn threshold(column: impl Into<String>, threshold_up: f64, threshold_down: f64) -> Self {
        Self {
            column: column.into(),
            signal_line: None,
            threshold_up: Some(threshold_up),
            threshold_down: Some(threshold_down),
            tolerance: None,
            neutral_band: None,
            inverted: false,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_neutral_band(mut self, lower: f64, upper: f64) -> Self {
        self.neutral_band = Some((lower, upper));
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// Evaluate against the table's last row only.
    pub fn evaluate(&self, table: &SeriesTable) -> Verdict {
        let Some(latest) = table.latest(&self.column) else {
            return Verdict::Neutral;
        };

        match &self.signal_line {
            Some(signal_column) => {
                let Some(signal_value) = table.latest(signal_column) else {
                    return Verdict::Neutral;
                };
                let tolerance = self.tolerance.unwrap_or(0.0);
                if latest > signal_value + tolerance {
                    self.directional(Verdict::Positive)
                } else if latest < signal_value - tolerance {
                    self.directional(Verdict::Negative)
                } else {
                    Verdict::Neutral
                }
            }
            None => {
                // Branch order is contractual: threshold_up, then
                // threshold_down, then the neutral band. An absent threshold
                // never fires, exact equality falls through, and once
                // neither threshold fired the verdict is neutral whether or
                // not the value sits inside the band.
                if self.threshold_up.is_some_and(|up| latest > up) {
                    self.directional(Verdict::Positive)
                } else if self.threshold_down.is_some_and(|down| latest < down) {
                    self.directional(Verdict::Negative)
                } else {
                    Verdict::Neutral
                }
            }
        }
    }

    /// Inversion flips the verdict of a fired comparison; it never swaps
    /// operands, so equality boundaries stay neutral either way.
    fn directional(&self, raw: Verdict) -> Verdict {
        if self.inverted {
            raw.invert()
        } else {
            raw
        }
    }
}
