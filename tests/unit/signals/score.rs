//! Unit tests for the scoring primitive

use chrono::{Duration, TimeZone, Utc};
use triframe::models::candle::Candle;
use triframe::models::table::SeriesTable;
use triframe::models::verdict::Verdict;
use triframe::signals::score::ScoreSpec;

fn base_table(rows: usize) -> SeriesTable {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let candles: Vec<Candle> = (0..rows)
        .map(|i| {
            let p = 100.0 + i as f64;
            Candle::new(p, p, p, p, 10.0, start + Duration::days(i as i64))
        })
        .collect();
    SeriesTable::from_candles(&candles)
}

fn table_with(columns: &[(&str, &[f64])]) -> SeriesTable {
    let rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
    let mut table = base_table(rows);
    for (name, values) in columns {
        table.insert_column(*name, values.to_vec());
    }
    table
}

#[test]
fn test_threshold_above_is_positive() {
    let table = table_with(&[("score", &[50.0, 75.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Positive);
}

#[test]
fn test_threshold_below_is_negative() {
    let table = table_with(&[("score", &[50.0, 20.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Negative);
}

#[test]
fn test_threshold_between_is_neutral() {
    let table = table_with(&[("score", &[20.0, 50.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_threshold_inverted_flips_verdicts() {
    let spec = ScoreSpec::threshold("score", 70.0, 30.0).inverted();
    let high = table_with(&[("score", &[75.0])]);
    assert_eq!(spec.evaluate(&high), Verdict::Negative);
    let low = table_with(&[("score", &[20.0])]);
    assert_eq!(spec.evaluate(&low), Verdict::Positive);
}

#[test]
fn test_threshold_equality_is_neutral_regardless_of_inversion() {
    let table = table_with(&[("score", &[70.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
    assert_eq!(spec.inverted().evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_threshold_branches_precede_neutral_band() {
    // 75 sits inside the band but above threshold_up; the threshold branch
    // is evaluated first.
    let table = table_with(&[("score", &[75.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0).with_neutral_band(0.0, 100.0);
    assert_eq!(spec.evaluate(&table), Verdict::Positive);
}

#[test]
fn test_threshold_neutral_band_value_is_neutral() {
    let table = table_with(&[("score", &[50.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0).with_neutral_band(40.0, 60.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_crossover_above_is_positive() {
    let table = table_with(&[("fast", &[9.0, 10.0]), ("slow", &[9.0, 8.0])]);
    let spec = ScoreSpec::crossover("fast", "slow");
    assert_eq!(spec.evaluate(&table), Verdict::Positive);
}

#[test]
fn test_crossover_below_is_negative() {
    let table = table_with(&[("fast", &[9.0, 8.0]), ("slow", &[9.0, 10.0])]);
    let spec = ScoreSpec::crossover("fast", "slow");
    assert_eq!(spec.evaluate(&table), Verdict::Negative);
}

#[test]
fn test_crossover_equal_is_neutral() {
    let table = table_with(&[("fast", &[9.0, 10.0]), ("slow", &[8.0, 10.0])]);
    let spec = ScoreSpec::crossover("fast", "slow");
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_crossover_tolerance_widens_neutral_zone() {
    let table = table_with(&[("fast", &[10.0]), ("slow", &[9.0])]);
    let spec = ScoreSpec::crossover("fast", "slow").with_tolerance(2.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_crossover_inverted_flips_verdicts() {
    let table = table_with(&[("fast", &[10.0]), ("slow", &[8.0])]);
    let spec = ScoreSpec::crossover("fast", "slow").inverted();
    assert_eq!(spec.evaluate(&table), Verdict::Negative);
}

#[test]
fn test_missing_column_is_neutral() {
    let table = base_table(2);
    let spec = ScoreSpec::threshold("ghost", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_missing_signal_line_is_neutral() {
    let table = table_with(&[("fast", &[10.0])]);
    let spec = ScoreSpec::crossover("fast", "ghost");
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_nan_latest_is_neutral() {
    let table = table_with(&[("score", &[80.0, f64::NAN])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_empty_table_is_neutral() {
    let table = SeriesTable::new();
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), Verdict::Neutral);
}

#[test]
fn test_evaluation_is_idempotent() {
    let table = table_with(&[("score", &[75.0])]);
    let spec = ScoreSpec::threshold("score", 70.0, 30.0);
    assert_eq!(spec.evaluate(&table), spec.evaluate(&table));
}
