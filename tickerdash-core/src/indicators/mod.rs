//! Technical indicators over a daily bar sequence.
//!
//! Indicators are pure functions: bar history in, numeric series out, same
//! length as the input. Warmup positions hold `f64::NAN`; the pipeline turns
//! those into `None` before anything leaves the core crate.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdLines};
pub use rsi::Rsi;
pub use sma::Sma;

use crate::domain::Bar;

/// A single-series indicator.
///
/// # Look-ahead guard
/// No value at index t may depend on a bar after t. Every implementation is
/// checked by the truncated-vs-full series test in `tests/lookahead_test.rs`.
pub trait Indicator: Send + Sync {
    /// Display name, e.g. "SMA 20".
    fn name(&self) -> &str;

    /// Number of leading values that are NaN when the input has no gaps.
    fn lookback(&self) -> usize;

    /// Compute over the whole series. Output length equals `bars.len()`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Map NaN warmup values to `None`.
pub fn defined(values: Vec<f64>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

/// Create synthetic bars from close prices for testing.
///
/// open = previous close (or close for the first bar), high/low = ±1 around
/// the body, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
