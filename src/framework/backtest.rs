//! Walk-forward backtest driver.
//!
//! Replays the anchor timeframe's history bar by bar. At each bar every
//! timeframe's visible data is truncated to what was known at that point,
//! the full aggregation pipeline recomputes, and a two-state position
//! machine turns the overall status stream into buy/sell events. The P&L
//! arithmetic itself is delegated to the portfolio simulator.

use crate::error::EngineError;
use crate::framework::TradingFramework;
use crate::models::table::COL_CLOSE;
use crate::models::verdict::Verdict;
use crate::portfolio::Portfolio;
use tracing::{debug, info};

impl TradingFramework {
    /// Replay history over the first registered timeframe's bars and hand
    /// the resulting buy/sell events to the portfolio simulator.
    ///
    /// Fails with a configuration error when no timeframe is registered;
    /// there is no anchor series to walk. Missing or NaN signal inputs
    /// degrade to neutral verdicts and never abort the walk.
    pub fn backtest(&mut self, initial_capital: f64) -> Result<Portfolio, EngineError> {
        if self.timeframes.is_empty() {
            return Err(EngineError::NoTimeframes);
        }

        let anchor = self.timeframes[0].data.clone();
        let bars = anchor.len();
        let full_tables: Vec<_> = self.timeframes.iter().map(|tf| tf.data.clone()).collect();

        let bias = self.bias_timeframes.clone();
        let confirmation = self.confirmation_timeframes.clone();

        info!(
            framework = %self.name,
            bars,
            timeframes = self.timeframes.len(),
            "starting walk-forward backtest"
        );

        let mut buy = vec![false; bars];
        let mut sell = vec![false; bars];
        let mut holding = false;

        for i in 0..bars {
            // Truncation goes through the update path: stamping last_update
            // marks every timeframe stale, so the pipeline fully recomputes
            // for this bar instead of serving cached verdicts.
            let now = self.current_timestamp();
            for (tf, full) in self.timeframes.iter_mut().zip(&full_tables) {
                tf.data = full.head(i + 1);
                tf.last_update = now;
            }

            let overall = self.determine_overall_status(&bias, &confirmation);
            match overall {
                Verdict::Positive if !holding => {
                    debug!(bar = i, "buy");
                    buy[i] = true;
                    holding = true;
                }
                Verdict::Negative if holding => {
                    debug!(bar = i, "sell");
                    sell[i] = true;
                    holding = false;
                }
                _ => {}
            }
        }

        // Put the full tables back; the walk must not consume the data.
        let now = self.current_timestamp();
        for (tf, full) in self.timeframes.iter_mut().zip(full_tables) {
            tf.data = full;
            tf.last_update = now;
        }

        let close = anchor
            .column(COL_CLOSE)
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| vec![f64::NAN; bars]);

        Ok(Portfolio::from_signals(&close, &buy, &sell, initial_capital))
    }
}
