//! Market data provider interface.

use crate::error::EngineError;
use crate::models::table::SeriesTable;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Supported data granularities. Anything else is an unsupported
/// configuration and fails at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timespan {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Timespan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timespan::Minute => "minute",
            Timespan::Hour => "hour",
            Timespan::Day => "day",
            Timespan::Week => "week",
            Timespan::Month => "month",
            Timespan::Quarter => "quarter",
            Timespan::Year => "year",
        }
    }

    /// Lookback window for a single-range query, sized to the provider's
    /// per-request row cap for intraday granularities and five years
    /// otherwise.
    pub fn default_lookback(&self) -> chrono::Duration {
        match self {
            Timespan::Minute => chrono::Duration::minutes(50_000),
            Timespan::Hour => chrono::Duration::hours(50_000),
            _ => chrono::Duration::days(1825),
        }
    }

    /// Intraday granularities are fetched in chunks.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Timespan::Minute | Timespan::Hour)
    }
}

impl FromStr for Timespan {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Timespan::Minute),
            "hour" => Ok(Timespan::Hour),
            "day" => Ok(Timespan::Day),
            "week" => Ok(Timespan::Week),
            "month" => Ok(Timespan::Month),
            "quarter" => Ok(Timespan::Quarter),
            "year" => Ok(Timespan::Year),
            other => Err(EngineError::UnsupportedTimespan(other.to_string())),
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument class, used to route snapshot price lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Stock,
    Crypto,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Stock => f.write_str("Stock"),
            AssetType::Crypto => f.write_str("Crypto"),
        }
    }
}

#[async_trait]
pub trait MarketDataProvider {
    /// Fetch an indexed OHLCV table for a ticker at the given granularity.
    async fn fetch_table(
        &self,
        ticker: &str,
        timespan: Timespan,
        multiplier: u32,
    ) -> Result<SeriesTable, EngineError>;

    /// Fetch the latest traded price for a ticker.
    async fn fetch_current_price(
        &self,
        ticker: &str,
        asset_type: AssetType,
    ) -> Result<f64, EngineError>;
}
