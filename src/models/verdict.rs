//! Ternary verdict domain and majority-vote arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The output domain of every aggregation level: signal, group, timeframe
/// and cross-timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Neutral,
    Negative,
}

impl Verdict {
    /// Swap positive and negative; neutral is a fixed point.
    pub fn invert(self) -> Self {
        match self {
            Verdict::Positive => Verdict::Negative,
            Verdict::Negative => Verdict::Positive,
            Verdict::Neutral => Verdict::Neutral,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Positive => "positive",
            Verdict::Neutral => "neutral",
            Verdict::Negative => "negative",
        };
        f.write_str(s)
    }
}

/// Accumulates verdict votes and resolves them under the two rules the
/// engine uses at different aggregation levels.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoteTally {
    positive: usize,
    neutral: usize,
    negative: usize,
}

impl VoteTally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Positive => self.positive += 1,
            Verdict::Neutral => self.neutral += 1,
            Verdict::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Positive-vs-negative plurality; neutral votes never win and a tie
    /// (including zero votes) resolves to neutral. Used inside a signal
    /// group and across a timeframe's groups.
    pub fn plurality(&self) -> Verdict {
        if self.positive > self.negative {
            Verdict::Positive
        } else if self.negative > self.positive {
            Verdict::Negative
        } else {
            Verdict::Neutral
        }
    }

    /// Strict majority over all votes cast (`count > total / 2`); anything
    /// short of that resolves to neutral. Neutral votes count toward the
    /// total. Used for the cross-timeframe overall status.
    pub fn strict_majority(&self) -> Verdict {
        let total = self.total();
        if 2 * self.positive > total {
            Verdict::Positive
        } else if 2 * self.negative > total {
            Verdict::Negative
        } else {
            Verdict::Neutral
        }
    }
}

impl FromIterator<Verdict> for VoteTally {
    fn from_iter<I: IntoIterator<Item = Verdict>>(iter: I) -> Self {
        let mut tally = VoteTally::default();
        for verdict in iter {
            tally.record(verdict);
        }
        tally
    }
}
