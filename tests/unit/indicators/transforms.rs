//! Unit tests for indicator transforms

use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use triframe::indicators::momentum::rsi::rsi;
use triframe::indicators::trend::ema::ema;
use triframe::indicators::trend::sma::sma;
use triframe::indicators::volatility::atr::atr;
use triframe::indicators::volatility::bollinger::bollinger;
use triframe::indicators::apply_strategy;
use triframe::models::candle::Candle;
use triframe::models::strategy::{IndicatorSpec, StrategySpec};
use triframe::models::table::SeriesTable;

fn table_from_closes(closes: &[f64]) -> SeriesTable {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let candles: Vec<Candle> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                50.0,
                start + Duration::days(i as i64),
            )
        })
        .collect();
    SeriesTable::from_candles(&candles)
}

fn columns_equal(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
}

#[test]
fn test_sma_warmup_and_values() {
    let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert!(out[0].is_nan() && out[1].is_nan());
    assert_relative_eq!(out[2], 2.0);
    assert_relative_eq!(out[3], 3.0);
    assert_relative_eq!(out[4], 4.0);
}

#[test]
fn test_sma_short_series_is_all_nan() {
    let out = sma(&[1.0, 2.0], 3);
    assert!(out.iter().all(|v| v.is_nan()));
}

#[test]
fn test_ema_seed_is_sma_of_first_period() {
    let values = [2.0, 4.0, 6.0, 8.0];
    let out = ema(&values, 3);
    assert!(out[0].is_nan() && out[1].is_nan());
    assert_relative_eq!(out[2], 4.0);
    // alpha = 0.5 at period 3
    assert_relative_eq!(out[3], 0.5 * 8.0 + 0.5 * 4.0);
}

#[test]
fn test_rsi_all_gains_is_100() {
    let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let out = rsi(&values, 14);
    assert!(out[13].is_nan());
    assert_relative_eq!(out[14], 100.0);
    assert_relative_eq!(out[19], 100.0);
}

#[test]
fn test_rsi_stays_in_range() {
    let values: Vec<f64> = (0..60)
        .map(|i| 100.0 + (i as f64 / 3.0).sin() * 10.0)
        .collect();
    let out = rsi(&values, 14);
    for v in out.iter().filter(|v| !v.is_nan()) {
        assert!((0.0..=100.0).contains(v), "rsi out of range: {v}");
    }
}

#[test]
fn test_bollinger_band_ordering() {
    let values: Vec<f64> = (0..40)
        .map(|i| 100.0 + (i as f64 / 4.0).sin() * 5.0)
        .collect();
    let (lower, middle, upper) = bollinger(&values, 20, 2.0);
    for i in 19..values.len() {
        assert!(lower[i] <= middle[i] && middle[i] <= upper[i]);
    }
}

#[test]
fn test_atr_is_positive_after_warmup() {
    let highs: Vec<f64> = (0..30).map(|i| 102.0 + i as f64 * 0.1).collect();
    let lows: Vec<f64> = (0..30).map(|i| 98.0 + i as f64 * 0.1).collect();
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.1).collect();
    let out = atr(&highs, &lows, &closes, 14);
    assert!(out[12].is_nan());
    for v in out.iter().skip(13) {
        assert!(*v > 0.0);
    }
}

#[test]
fn test_apply_strategy_inserts_expected_columns() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 0.5).collect();
    let mut table = table_from_closes(&closes);
    let strategy = StrategySpec::new(
        "Test",
        vec![
            IndicatorSpec::Sma { period: 20 },
            IndicatorSpec::Rsi { period: 14 },
            IndicatorSpec::Macd {
                fast: 12,
                slow: 26,
                signal: 9,
            },
            IndicatorSpec::Bollinger {
                period: 20,
                std_dev: 2.0,
            },
            IndicatorSpec::Atr { period: 14 },
        ],
    );
    apply_strategy(&mut table, &strategy);

    for name in [
        "SMA_20",
        "RSI_14",
        "MACD_12_26_9",
        "MACDs_12_26_9",
        "MACDh_12_26_9",
        "BBL_20_2",
        "BBM_20_2",
        "BBU_20_2",
        "ATRr_14",
    ] {
        assert!(table.column(name).is_some(), "missing column {name}");
        assert_eq!(table.column(name).unwrap().len(), table.len());
    }
}

#[test]
fn test_apply_strategy_is_idempotent() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 / 5.0).sin() * 3.0).collect();
    let mut table = table_from_closes(&closes);
    let strategy = StrategySpec::new(
        "Test",
        vec![
            IndicatorSpec::Sma { period: 10 },
            IndicatorSpec::Rsi { period: 14 },
        ],
    );

    apply_strategy(&mut table, &strategy);
    let sma_once = table.column("SMA_10").unwrap().to_vec();
    let rsi_once = table.column("RSI_14").unwrap().to_vec();

    apply_strategy(&mut table, &strategy);
    assert!(columns_equal(&sma_once, table.column("SMA_10").unwrap()));
    assert!(columns_equal(&rsi_once, table.column("RSI_14").unwrap()));
}

#[test]
fn test_apply_strategy_without_close_is_a_noop() {
    let mut table = SeriesTable::new();
    let strategy = StrategySpec::new("Test", vec![IndicatorSpec::Sma { period: 10 }]);
    apply_strategy(&mut table, &strategy);
    assert!(table.column("SMA_10").is_none());
}
