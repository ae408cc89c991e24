use crate::models::table::SeriesTable;
use crate::models::verdict::Verdict;
use crate::signals::score::ScoreSpec;
use serde::{Deserialize, Serialize};

/// A named scoring rule. Immutable after construction; owned by exactly one
/// signal group. The chart flags are informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    name: String,
    spec: ScoreSpec,
    #[serde(default)]
    pub chart: bool,
    #[serde(default)]
    pub subplot: bool,
}

impl Signal {
    pub fn new(name: impl Into<String>, spec: ScoreSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            chart: false,
            subplot: false,
        }
    }

    pub fn with_chart(mut self) -> Self {
        self.chart = true;
        self
    }

    pub fn with_subplot(mut self) -> Self {
        self.subplot = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pure function of the input table; no caching, no side effects.
    pub fn evaluate(&self, table: &SeriesTable) -> Verdict {
        self.spec.evaluate(table)
    }
}
