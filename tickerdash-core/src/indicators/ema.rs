//! Exponential Moving Average (EMA).
//!
//! EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! The recursion starts from the first defined input; the first `period - 1`
//! outputs are hidden as warmup.

use super::Indicator;
use crate::domain::bar::closes;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("EMA {period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        ema_of_series(&closes(bars), self.period)
    }
}

/// Smoothing constant for an N-period EMA.
pub fn alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// EMA over an arbitrary series.
///
/// Leading NaNs are skipped: the recursion starts at the first defined value
/// and output begins `period - 1` steps later. This is what lets the MACD
/// signal line run over a MACD series that itself starts with a warmup. A NaN
/// after the start taints the rest of the output.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 {
        return result;
    }

    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };
    let first_out = start + period - 1;
    if first_out >= n {
        return result;
    }

    let a = alpha(period);
    let mut prev = values[start];
    if first_out == start {
        result[start] = prev;
    }
    for i in start + 1..n {
        let x = values[i];
        if x.is_nan() {
            break;
        }
        prev = a * x + (1.0 - a) * prev;
        if i >= first_out {
            result[i] = prev;
        }
    }

    result
}
