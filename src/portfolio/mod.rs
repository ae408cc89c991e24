//! Portfolio simulation: turns buy/sell event series and a close-price
//! series into realized performance.
//!
//! The policy is all-in/all-out at unit granularity: a buy converts all
//! cash to units at that bar's close, a sell converts back. There is no
//! slippage, fee, or sizing model.

use tracing::warn;

/// The result of replaying one buy/sell sequence over a price series.
#[derive(Debug, Clone)]
pub struct Portfolio {
    initial_capital: f64,
    equity: Vec<f64>,
    trades: usize,
}

impl Portfolio {
    /// Replay `buy`/`sell` events against `close`. The three series share an
    /// index; a NaN close carries the previous equity forward and is never
    /// tradable. A buy while already holding, or a sell while flat, is
    /// ignored.
    pub fn from_signals(close: &[f64], buy: &[bool], sell: &[bool], initial_capital: f64) -> Self {
        if buy.len() != close.len() || sell.len() != close.len() {
            warn!(
                close = close.len(),
                buy = buy.len(),
                sell = sell.len(),
                "signal series lengths differ from price series; extra entries are ignored"
            );
        }

        let mut cash = initial_capital;
        let mut units = 0.0_f64;
        let mut last_equity = initial_capital;
        let mut trades = 0;
        let mut equity = Vec::with_capacity(close.len());

        for (i, &price) in close.iter().enumerate() {
            if price.is_finite() && price > 0.0 {
                let buying = buy.get(i).copied().unwrap_or(false);
                let selling = sell.get(i).copied().unwrap_or(false);
                if buying && units == 0.0 {
                    units = cash / price;
                    cash = 0.0;
                    trades += 1;
                } else if selling && units > 0.0 {
                    cash = units * price;
                    units = 0.0;
                    trades += 1;
                }
                last_equity = cash + units * price;
            }
            equity.push(last_equity);
        }

        Self {
            initial_capital,
            equity,
            trades,
        }
    }

    /// Mark-to-market value after the final bar.
    pub fn final_value(&self) -> f64 {
        self.equity.last().copied().unwrap_or(self.initial_capital)
    }

    /// Total return as a fraction of initial capital.
    pub fn total_return(&self) -> f64 {
        if self.initial_capital == 0.0 {
            return 0.0;
        }
        self.final_value() / self.initial_capital - 1.0
    }

    /// Number of executed buy and sell events.
    pub fn trade_count(&self) -> usize {
        self.trades
    }

    /// Largest peak-to-trough decline of the equity curve, as a fraction.
    pub fn max_drawdown(&self) -> f64 {
        let mut peak = f64::MIN;
        let mut max_dd = 0.0_f64;
        for &value in &self.equity {
            if value > peak {
                peak = value;
            }
            if peak > 0.0 {
                max_dd = max_dd.max((peak - value) / peak);
            }
        }
        max_dd
    }

    pub fn equity_curve(&self) -> &[f64] {
        &self.equity
    }
}
