//! Simple Moving Average (SMA).
//!
//! Trailing arithmetic mean of close prices. First defined value at index
//! period-1; any NaN inside the window makes that position NaN.

use super::Indicator;
use crate::domain::bar::closes;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("SMA {period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        sma_of_series(&closes(bars), self.period)
    }
}

/// Rolling mean over an arbitrary series. Tracks the NaN count inside the window.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let mut sum = 0.0;
    let mut nans = 0usize;
    for (i, &entering) in values.iter().enumerate() {
        if entering.is_nan() {
            nans += 1;
        } else {
            sum += entering;
        }

        if i >= period {
            let leaving = values[i - period];
            if leaving.is_nan() {
                nans -= 1;
            } else {
                sum -= leaving;
            }
        }

        if i + 1 >= period && nans == 0 {
            result[i] = sum / period as f64;
        }
    }

    result
}
