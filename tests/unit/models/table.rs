//! Unit tests for the time-series table

use chrono::{Duration, TimeZone, Utc};
use triframe::models::candle::Candle;
use triframe::models::table::{SeriesTable, COL_CLOSE};

fn candles(closes: &[f64], start_day: i64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(start_day);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                100.0,
                start + Duration::days(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_from_candles_has_ohlcv_columns() {
    let table = SeriesTable::from_candles(&candles(&[1.0, 2.0, 3.0], 0));
    assert_eq!(table.len(), 3);
    for name in ["open", "high", "low", "close", "volume"] {
        assert!(table.column(name).is_some(), "missing column {name}");
    }
}

#[test]
fn test_latest_reads_last_row() {
    let table = SeriesTable::from_candles(&candles(&[1.0, 2.0, 3.0], 0));
    assert_eq!(table.latest(COL_CLOSE), Some(3.0));
}

#[test]
fn test_latest_absent_column_is_none() {
    let table = SeriesTable::from_candles(&candles(&[1.0], 0));
    assert_eq!(table.latest("nope"), None);
}

#[test]
fn test_latest_empty_table_is_none() {
    let table = SeriesTable::new();
    assert_eq!(table.latest(COL_CLOSE), None);
}

#[test]
fn test_latest_nan_is_none() {
    let mut table = SeriesTable::from_candles(&candles(&[1.0, 2.0], 0));
    table.insert_column("indicator", vec![5.0, f64::NAN]);
    assert_eq!(table.latest("indicator"), None);
}

#[test]
fn test_insert_column_replaces_and_pads() {
    let mut table = SeriesTable::from_candles(&candles(&[1.0, 2.0, 3.0], 0));
    table.insert_column("x", vec![9.0]);
    let col = table.column("x").unwrap();
    assert_eq!(col.len(), 3);
    assert_eq!(col[0], 9.0);
    assert!(col[1].is_nan() && col[2].is_nan());

    table.insert_column("x", vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(table.column("x").unwrap(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_head_truncates_all_columns() {
    let table = SeriesTable::from_candles(&candles(&[1.0, 2.0, 3.0, 4.0], 0));
    let head = table.head(2);
    assert_eq!(head.len(), 2);
    assert_eq!(head.column(COL_CLOSE).unwrap(), &[1.0, 2.0]);
    assert_eq!(head.index().len(), 2);
}

#[test]
fn test_head_caps_at_length() {
    let table = SeriesTable::from_candles(&candles(&[1.0, 2.0], 0));
    assert_eq!(table.head(10).len(), 2);
}

#[test]
fn test_merge_sorts_and_dedups() {
    // Second chunk overlaps the first by one day and starts earlier.
    let mut first = SeriesTable::from_candles(&candles(&[3.0, 4.0], 2));
    let second = SeriesTable::from_candles(&candles(&[1.0, 2.0, 99.0], 0));
    first.merge(second);

    assert_eq!(first.len(), 4);
    let close = first.column(COL_CLOSE).unwrap();
    // Day 2 existed in both; the first-merged occurrence (3.0) wins.
    assert_eq!(close, &[1.0, 2.0, 3.0, 4.0]);

    let index = first.index();
    assert!(index.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_merge_into_empty() {
    let mut table = SeriesTable::new();
    table.merge(SeriesTable::from_candles(&candles(&[1.0, 2.0], 0)));
    assert_eq!(table.len(), 2);
    assert_eq!(table.latest(COL_CLOSE), Some(2.0));
}
