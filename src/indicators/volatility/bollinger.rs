//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + (std_dev * standard deviation)
//! Lower Band = Middle - (std_dev * standard deviation)

use crate::indicators::trend::sma::sma;

/// Full-series Bollinger Bands: returns (lower, middle, upper), each NaN
/// over the warmup prefix.
pub fn bollinger(values: &[f64], period: usize, std_dev: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = values.len();
    let middle = sma(values, period);
    let mut lower = vec![f64::NAN; n];
    let mut upper = vec![f64::NAN; n];

    if period == 0 || n < period {
        return (lower, middle, upper);
    }

    for i in (period - 1)..n {
        if middle[i].is_nan() {
            continue;
        }
        let window = &values[i + 1 - period..=i];
        let variance = window
            .iter()
            .map(|v| (v - middle[i]).powi(2))
            .sum::<f64>()
            / period as f64;
        let sigma = variance.sqrt();
        lower[i] = middle[i] - std_dev * sigma;
        upper[i] = middle[i] + std_dev * sigma;
    }

    (lower, middle, upper)
}
