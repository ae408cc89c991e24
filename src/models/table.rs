//! Indexed time-series table: the data surface every signal rule and
//! indicator transform operates on.
//!
//! A table is a monotonically increasing timestamp index plus named `f64`
//! columns of the same length. Missing values are NaN, so a column computed
//! with a warmup window simply carries a NaN prefix and signal rules degrade
//! to neutral over it.

use crate::models::candle::Candle;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub const COL_OPEN: &str = "open";
pub const COL_HIGH: &str = "high";
pub const COL_LOW: &str = "low";
pub const COL_CLOSE: &str = "close";
pub const COL_VOLUME: &str = "volume";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    index: Vec<DateTime<Utc>>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with the five canonical OHLCV columns.
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut table = Self {
            index: candles.iter().map(|c| c.timestamp).collect(),
            columns: BTreeMap::new(),
        };
        table.columns.insert(
            COL_OPEN.to_string(),
            candles.iter().map(|c| c.open).collect(),
        );
        table.columns.insert(
            COL_HIGH.to_string(),
            candles.iter().map(|c| c.high).collect(),
        );
        table
            .columns
            .insert(COL_LOW.to_string(), candles.iter().map(|c| c.low).collect());
        table.columns.insert(
            COL_CLOSE.to_string(),
            candles.iter().map(|c| c.close).collect(),
        );
        table.columns.insert(
            COL_VOLUME.to_string(),
            candles.iter().map(|c| c.volume).collect(),
        );
        table
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    /// Insert a column, replacing any previous one of the same name.
    /// Values are NaN-padded or truncated to the index length, so a
    /// re-applied indicator transform always lands cleanly.
    pub fn insert_column(&mut self, name: impl Into<String>, mut values: Vec<f64>) {
        values.resize(self.index.len(), f64::NAN);
        self.columns.insert(name.into(), values);
    }

    /// Latest value of a column: None when the column is absent, the table
    /// is empty, or the most recent observation is NaN.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.columns
            .get(name)
            .and_then(|col| col.last())
            .copied()
            .filter(|v| !v.is_nan())
    }

    /// First `n` rows of the table (all columns), capped at the table length.
    pub fn head(&self, n: usize) -> SeriesTable {
        let n = n.min(self.index.len());
        SeriesTable {
            index: self.index[..n].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(name, col)| (name.clone(), col[..n].to_vec()))
                .collect(),
        }
    }

    /// Append another table's rows, then sort by timestamp and drop rows
    /// with duplicate timestamps (first occurrence wins). Columns absent on
    /// one side are NaN-filled. Used to combine chunked fetches.
    pub fn merge(&mut self, other: SeriesTable) {
        if other.is_empty() {
            return;
        }

        let self_len = self.index.len();
        let mut names: Vec<String> = self.columns.keys().cloned().collect();
        for name in other.columns.keys() {
            if !self.columns.contains_key(name) {
                names.push(name.clone());
            }
        }

        let mut index = std::mem::take(&mut self.index);
        index.extend_from_slice(&other.index);

        let mut columns = BTreeMap::new();
        for name in names {
            let mut merged = self
                .columns
                .remove(&name)
                .unwrap_or_else(|| vec![f64::NAN; self_len]);
            match other.columns.get(&name) {
                Some(col) => merged.extend_from_slice(col),
                None => merged.extend(std::iter::repeat(f64::NAN).take(other.index.len())),
            }
            columns.insert(name, merged);
        }

        let mut order: Vec<usize> = (0..index.len()).collect();
        order.sort_by_key(|&i| index[i]);

        let mut seen_last: Option<DateTime<Utc>> = None;
        let mut kept = Vec::with_capacity(order.len());
        for i in order {
            if seen_last != Some(index[i]) {
                seen_last = Some(index[i]);
                kept.push(i);
            }
        }

        self.index = kept.iter().map(|&i| index[i]).collect();
        self.columns = columns
            .into_iter()
            .map(|(name, col)| (name, kept.iter().map(|&i| col[i]).collect()))
            .collect();
    }
}
