//! Crate-level error taxonomy.
//!
//! Only genuinely fatal conditions live here: a backtest with no anchor
//! series, an unrecognized data granularity, or a transport failure. Missing
//! columns, NaN values and unknown timeframe names degrade to neutral
//! verdicts or no-op outcomes instead of surfacing as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no timeframes registered; the backtest has no anchor series")]
    NoTimeframes,

    #[error("unsupported timespan: {0}")]
    UnsupportedTimespan(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("snapshot request for {ticker} returned status {status}")]
    SnapshotFailed { ticker: String, status: u16 },
}
