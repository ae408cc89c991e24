//! Typed indicator strategy configuration.
//!
//! A strategy is a named list of indicator specifications applied to a
//! timeframe's table. The set of indicators is a closed enum so a strategy
//! is checkable at construction time, and each variant knows the column
//! name(s) it produces.

use serde::{Deserialize, Serialize};

/// A named indicator set attached to one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub name: String,
    pub description: String,
    pub indicators: Vec<IndicatorSpec>,
}

impl StrategySpec {
    pub fn new(name: impl Into<String>, indicators: Vec<IndicatorSpec>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            indicators,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The generated fallback for a timeframe registered without an explicit
    /// strategy: named after the timeframe, computing nothing.
    pub fn default_for(timeframe_name: &str) -> Self {
        Self {
            name: format!("{timeframe_name} Default Strategy"),
            description: "Default strategy for new timeframe".to_string(),
            indicators: Vec::new(),
        }
    }
}

/// One indicator computation over a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Sma { period: usize },
    Ema { period: usize },
    Rsi { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    Bollinger { period: usize, std_dev: f64 },
    Atr { period: usize },
}

impl IndicatorSpec {
    /// Column names this indicator writes, in pandas-ta style so signal
    /// rules can reference them by the conventional names.
    pub fn columns(&self) -> Vec<String> {
        match self {
            IndicatorSpec::Sma { period } => vec![format!("SMA_{period}")],
            IndicatorSpec::Ema { period } => vec![format!("EMA_{period}")],
            IndicatorSpec::Rsi { period } => vec![format!("RSI_{period}")],
            IndicatorSpec::Macd { fast, slow, signal } => vec![
                format!("MACD_{fast}_{slow}_{signal}"),
                format!("MACDs_{fast}_{slow}_{signal}"),
                format!("MACDh_{fast}_{slow}_{signal}"),
            ],
            IndicatorSpec::Bollinger { period, std_dev } => vec![
                format!("BBL_{period}_{std_dev}"),
                format!("BBM_{period}_{std_dev}"),
                format!("BBU_{period}_{std_dev}"),
            ],
            IndicatorSpec::Atr { period } => vec![format!("ATRr_{period}")],
        }
    }
}
