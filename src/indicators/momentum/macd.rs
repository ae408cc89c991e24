//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal) of the MACD line
//! Histogram = MACD - Signal

use crate::indicators::trend::ema::ema;

/// Full-series MACD: returns (macd line, signal line, histogram), each NaN
/// over its warmup prefix.
pub fn macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = values.len();
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let mut macd_line = vec![f64::NAN; n];
    for i in 0..n {
        if !fast_ema[i].is_nan() && !slow_ema[i].is_nan() {
            macd_line[i] = fast_ema[i] - slow_ema[i];
        }
    }

    // The signal line smooths only the defined part of the MACD line.
    let mut signal_line = vec![f64::NAN; n];
    if let Some(first) = macd_line.iter().position(|v| !v.is_nan()) {
        let tail = ema(&macd_line[first..], signal);
        for (offset, value) in tail.into_iter().enumerate() {
            signal_line[first + offset] = value;
        }
    }

    let mut histogram = vec![f64::NAN; n];
    for i in 0..n {
        if !macd_line[i].is_nan() && !signal_line[i].is_nan() {
            histogram[i] = macd_line[i] - signal_line[i];
        }
    }

    (macd_line, signal_line, histogram)
}
