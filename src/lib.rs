//! Multi-timeframe ternary signal aggregation and walk-forward backtesting.
//!
//! Signals score the latest observation of an indexed time-series table
//! into one of {positive, neutral, negative}. Signal groups aggregate
//! member verdicts by majority vote behind a staleness-aware cache,
//! timeframes aggregate their groups, and the framework resolves a strict
//! majority across bias, confirmation and active timeframes. The backtest
//! driver replays that pipeline bar by bar through a two-state position
//! machine and hands the resulting buy/sell events to the portfolio
//! simulator.

pub mod config;
pub mod error;
pub mod framework;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod portfolio;
pub mod services;
pub mod signals;
pub mod watchlist;

pub use error::EngineError;
