//! Watchlist orchestration: a collection of tradable instruments, each
//! optionally bound to a trading framework, driven through fetch →
//! evaluate → backtest per instrument.

use crate::framework::{TimeframeReport, TradingFramework};
use crate::models::verdict::Verdict;
use crate::portfolio::Portfolio;
use crate::services::market_data::{AssetType, MarketDataProvider};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// Results from the latest framework evaluation of one instrument.
#[derive(Debug, Clone)]
pub struct FrameworkResults {
    pub timeframe_statuses: BTreeMap<String, TimeframeReport>,
    pub overall_status: Verdict,
}

/// One tracked instrument and everything computed for it so far.
pub struct WatchlistItem {
    pub name: String,
    pub ticker: String,
    pub asset_type: AssetType,
    pub current_price: Option<f64>,
    pub framework: Option<TradingFramework>,
    pub framework_results: Option<FrameworkResults>,
    pub backtest_results: Option<Portfolio>,
    pub backtest_pnl_percent: Option<f64>,
}

impl WatchlistItem {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            asset_type,
            current_price: None,
            framework: None,
            framework_results: None,
            backtest_results: None,
            backtest_pnl_percent: None,
        }
    }

    pub fn with_framework(mut self, framework: TradingFramework) -> Self {
        self.framework = Some(framework);
        self
    }

    /// Refresh the current price from the provider. A failed lookup is
    /// logged and leaves the previous price in place.
    pub async fn fetch_current_price<P: MarketDataProvider>(&mut self, provider: &P) {
        match provider
            .fetch_current_price(&self.ticker, self.asset_type)
            .await
        {
            Ok(price) => self.current_price = Some(price),
            Err(err) => {
                warn!(ticker = %self.ticker, %err, "failed to fetch current price");
            }
        }
    }

    /// Run the full framework evaluation and store the per-timeframe
    /// statuses plus the cross-timeframe overall status.
    pub fn evaluate_framework(&mut self) {
        let Some(framework) = self.framework.as_mut() else {
            info!(ticker = %self.ticker, "no framework assigned");
            return;
        };

        info!(ticker = %self.ticker, "evaluating framework");
        let timeframe_statuses = framework.evaluate_all_timeframes();
        let bias = framework.bias_timeframes.clone();
        let confirmation = framework.confirmation_timeframes.clone();
        let overall_status = framework.determine_overall_status(&bias, &confirmation);
        self.framework_results = Some(FrameworkResults {
            timeframe_statuses,
            overall_status,
        });
    }

    /// Backtest the instrument with its framework and record the portfolio
    /// plus the rounded P&L percentage.
    pub fn perform_backtest(&mut self, initial_capital: f64) {
        let Some(framework) = self.framework.as_mut() else {
            info!(ticker = %self.ticker, "no framework assigned for backtesting");
            self.backtest_results = None;
            return;
        };

        info!(ticker = %self.ticker, "performing backtest");
        match framework.backtest(initial_capital) {
            Ok(portfolio) => {
                let pnl_percent = portfolio.total_return() * 100.0;
                self.backtest_pnl_percent = Some((pnl_percent * 100.0).round() / 100.0);
                self.backtest_results = Some(portfolio);
                info!(ticker = %self.ticker, "backtest completed");
            }
            Err(err) => {
                warn!(ticker = %self.ticker, %err, "backtest failed");
                self.backtest_results = None;
            }
        }
    }
}

impl fmt::Display for WatchlistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}: Current Price: {}, Framework Overall Status: {}, Backtest P&L%: {}",
            self.name,
            self.ticker,
            self.asset_type,
            self.current_price
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            self.framework_results
                .as_ref()
                .map(|r| r.overall_status.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.backtest_pnl_percent
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}

/// Manages the tracked instruments, keyed by ticker.
pub struct Watchlist<P: MarketDataProvider> {
    provider: P,
    items: BTreeMap<String, WatchlistItem>,
}

impl<P: MarketDataProvider> Watchlist<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            items: BTreeMap::new(),
        }
    }

    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        ticker: impl Into<String>,
        asset_type: AssetType,
        framework: Option<TradingFramework>,
    ) {
        let ticker = ticker.into();
        info!(%ticker, "adding to watchlist");
        let mut item = WatchlistItem::new(name, ticker.clone(), asset_type);
        item.framework = framework;
        self.items.insert(ticker, item);
    }

    pub fn remove_item(&mut self, ticker: &str) {
        if self.items.remove(ticker).is_some() {
            info!(ticker, "removing from watchlist");
        }
    }

    pub fn item(&self, ticker: &str) -> Option<&WatchlistItem> {
        self.items.get(ticker)
    }

    pub fn items(&self) -> impl Iterator<Item = &WatchlistItem> {
        self.items.values()
    }

    /// Update current prices for every item, sequentially.
    pub async fn update_prices(&mut self) {
        let provider = &self.provider;
        for item in self.items.values_mut() {
            info!(ticker = %item.ticker, "updating price");
            item.fetch_current_price(provider).await;
        }
    }

    /// Evaluate the trading framework of every item.
    pub fn evaluate_frameworks(&mut self) {
        info!("evaluating frameworks for all watchlist items");
        for item in self.items.values_mut() {
            item.evaluate_framework();
        }
    }

    /// Backtest every item with its framework.
    pub fn perform_backtests(&mut self, initial_capital: f64) {
        info!("performing backtests for all watchlist items");
        for item in self.items.values_mut() {
            item.perform_backtest(initial_capital);
        }
    }

    /// Render a one-line summary per item.
    pub fn show(&self) {
        for item in self.items.values() {
            println!("{item}");
        }
    }
}
