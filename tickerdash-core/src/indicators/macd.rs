//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow) of close.
//! Signal line = EMA(signal) of the MACD line.
//! With 12/26/9: MACD first defined at index 25, signal at index 33.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::bar::closes;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

/// MACD and signal lines, index-aligned with the input bars.
#[derive(Debug, Clone)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        Self {
            fast,
            slow,
            signal,
            name: format!("MACD {fast}/{slow}/{signal}"),
        }
    }

    /// Standard 12/26/9 parameters.
    pub fn standard() -> Self {
        Self::new(12, 26, 9)
    }

    /// Index of the first defined signal value on gap-free input.
    pub fn signal_lookback(&self) -> usize {
        self.slow - 1 + self.signal - 1
    }

    /// Compute both lines in one pass over the closes.
    pub fn compute_lines(&self, bars: &[Bar]) -> MacdLines {
        let closes = closes(bars);
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&macd, self.signal);
        MacdLines { macd, signal }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.compute_lines(bars).macd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, ema_of_series, make_bars};

    fn trending(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.7).sin()).collect()
    }

    #[test]
    fn warmup_positions() {
        let bars = make_bars(&trending(60));
        let lines = Macd::standard().compute_lines(&bars);
        assert!(lines.macd[..25].iter().all(|v| v.is_nan()));
        assert!(!lines.macd[25].is_nan());
        assert!(lines.signal[..33].iter().all(|v| v.is_nan()));
        assert!(lines.signal[33..].iter().all(|v| !v.is_nan()));
        assert_eq!(Macd::standard().signal_lookback(), 33);
    }

    #[test]
    fn macd_is_difference_of_emas() {
        let closes = trending(50);
        let bars = make_bars(&closes);
        let lines = Macd::standard().compute_lines(&bars);
        let e12 = ema_of_series(&closes, 12);
        let e26 = ema_of_series(&closes, 26);
        for i in 25..50 {
            assert_approx(lines.macd[i], e12[i] - e26[i], 1e-12);
        }
    }

    #[test]
    fn signal_is_ema_of_macd() {
        let bars = make_bars(&trending(70));
        let lines = Macd::standard().compute_lines(&bars);
        let defined: Vec<f64> = lines.macd[25..].to_vec();
        let expected = ema_of_series(&defined, 9);
        for (i, &e) in expected.iter().enumerate() {
            let got = lines.signal[25 + i];
            if e.is_nan() {
                assert!(got.is_nan());
            } else {
                assert_approx(got, e, 1e-12);
            }
        }
    }

    /// Unadjusted exponential weighting: starts at the first defined value,
    /// hides the first `min_periods - 1` outputs.
    fn ewm_unadjusted(values: &[f64], span: usize, min_periods: usize) -> Vec<f64> {
        let a = 2.0 / (span as f64 + 1.0);
        let mut out = vec![f64::NAN; values.len()];
        let mut prev: Option<f64> = None;
        let mut seen = 0;
        for (i, &x) in values.iter().enumerate() {
            if x.is_nan() {
                continue;
            }
            let next = match prev {
                None => x,
                Some(p) => a * x + (1.0 - a) * p,
            };
            prev = Some(next);
            seen += 1;
            if seen >= min_periods {
                out[i] = next;
            }
        }
        out
    }

    #[test]
    fn small_periods_known_values() {
        // fast 2 (alpha 2/3), slow 3 (alpha 1/2), signal 2 over 1..=6
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let lines = Macd::new(2, 3, 2).compute_lines(&bars);

        assert!(lines.macd[..2].iter().all(|v| v.is_nan()));
        assert_approx(lines.macd[2], 11.0 / 36.0, 1e-12);
        assert_approx(lines.macd[3], 85.0 / 216.0, 1e-12);
        assert_approx(lines.macd[4], 575.0 / 1296.0, 1e-12);
        assert_approx(lines.macd[5], 3661.0 / 7776.0, 1e-12);

        assert!(lines.signal[..3].iter().all(|v| v.is_nan()));
        assert_approx(lines.signal[3], 59.0 / 162.0, 1e-12);
        assert_approx(lines.signal[4], 811.0 / 1944.0, 1e-12);
    }

    #[test]
    fn standard_lines_match_unadjusted_ewm() {
        let bars = make_bars(&trending(126));
        let closes = closes(&bars);
        let fast = ewm_unadjusted(&closes, 12, 12);
        let slow = ewm_unadjusted(&closes, 26, 26);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ewm_unadjusted(&macd, 9, 9);

        let lines = Macd::standard().compute_lines(&bars);
        for i in 0..126 {
            if macd[i].is_nan() {
                assert!(lines.macd[i].is_nan(), "macd defined early at {i}");
            } else {
                assert_approx(lines.macd[i], macd[i], 1e-9);
            }
            if signal[i].is_nan() {
                assert!(lines.signal[i].is_nan(), "signal defined early at {i}");
            } else {
                assert_approx(lines.signal[i], signal[i], 1e-9);
            }
        }
        assert!(!lines.macd[25].is_nan());
        assert!(!lines.signal[33].is_nan());
    }

    #[test]
    fn constant_prices_give_zero_lines() {
        let bars = make_bars(&[42.0; 80]);
        let lines = Macd::standard().compute_lines(&bars);
        for i in 33..80 {
            assert_approx(lines.macd[i], 0.0, 1e-9);
            assert_approx(lines.signal[i], 0.0, 1e-9);
        }
    }

    #[test]
    fn short_input_is_all_nan() {
        let bars = make_bars(&trending(20));
        let lines = Macd::standard().compute_lines(&bars);
        assert!(lines.macd.iter().all(|v| v.is_nan()));
        assert!(lines.signal.iter().all(|v| v.is_nan()));
    }

    #[test]
    #[should_panic(expected = "shorter than slow")]
    fn rejects_inverted_periods() {
        Macd::new(26, 12, 9);
    }
}
