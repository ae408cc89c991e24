//! Column-producing indicator transforms.
//!
//! `apply_strategy` is the collaborator the framework delegates to when a
//! timeframe's data is refreshed: it computes every indicator named in the
//! strategy over the table and inserts the resulting columns. Re-application
//! replaces columns in place, so repeated runs under staleness recomputation
//! never corrupt previously computed signal inputs.

pub mod momentum;
pub mod trend;
pub mod volatility;

use crate::models::strategy::{IndicatorSpec, StrategySpec};
use crate::models::table::{SeriesTable, COL_CLOSE, COL_HIGH, COL_LOW};
use tracing::warn;

pub fn apply_strategy(table: &mut SeriesTable, strategy: &StrategySpec) {
    for spec in &strategy.indicators {
        apply_indicator(table, spec);
    }
}

fn apply_indicator(table: &mut SeriesTable, spec: &IndicatorSpec) {
    let Some(close) = table.column(COL_CLOSE).map(<[f64]>::to_vec) else {
        warn!(indicator = ?spec, "table has no close column, skipping indicator");
        return;
    };

    let names = spec.columns();
    match spec {
        IndicatorSpec::Sma { period } => {
            table.insert_column(names[0].as_str(), trend::sma::sma(&close, *period));
        }
        IndicatorSpec::Ema { period } => {
            table.insert_column(names[0].as_str(), trend::ema::ema(&close, *period));
        }
        IndicatorSpec::Rsi { period } => {
            table.insert_column(names[0].as_str(), momentum::rsi::rsi(&close, *period));
        }
        IndicatorSpec::Macd { fast, slow, signal } => {
            let (macd_line, signal_line, histogram) =
                momentum::macd::macd(&close, *fast, *slow, *signal);
            table.insert_column(names[0].as_str(), macd_line);
            table.insert_column(names[1].as_str(), signal_line);
            table.insert_column(names[2].as_str(), histogram);
        }
        IndicatorSpec::Bollinger { period, std_dev } => {
            let (lower, middle, upper) =
                volatility::bollinger::bollinger(&close, *period, *std_dev);
            table.insert_column(names[0].as_str(), lower);
            table.insert_column(names[1].as_str(), middle);
            table.insert_column(names[2].as_str(), upper);
        }
        IndicatorSpec::Atr { period } => {
            let (Some(high), Some(low)) = (
                table.column(COL_HIGH).map(<[f64]>::to_vec),
                table.column(COL_LOW).map(<[f64]>::to_vec),
            ) else {
                warn!("table has no high/low columns, skipping ATR");
                return;
            };
            table.insert_column(
                names[0].as_str(),
                volatility::atr::atr(&high, &low, &close, *period),
            );
        }
    }
}
