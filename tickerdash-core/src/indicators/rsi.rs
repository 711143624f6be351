//! Relative Strength Index (RSI), Wilder smoothing.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Seed averages are simple means of the first `period` close-to-close
//! changes, so the first value lands at index `period`.
//! Edge cases: no losses → 100 (a flat window included), no gains → 0.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("RSI {period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let period = self.period;
        let mut result = vec![f64::NAN; n];

        if n < period + 1 {
            return result;
        }

        let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();

        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for &ch in &changes[..period] {
            if ch.is_nan() {
                return result;
            }
            avg_gain += ch.max(0.0);
            avg_loss += (-ch).max(0.0);
        }
        avg_gain /= period as f64;
        avg_loss /= period as f64;
        result[period] = rsi_from_averages(avg_gain, avg_loss);

        let alpha = 1.0 / period as f64;
        // changes[k] is the move into bar k + 1
        for (k, &ch) in changes.iter().enumerate().skip(period) {
            if ch.is_nan() {
                break;
            }
            avg_gain = alpha * ch.max(0.0) + (1.0 - alpha) * avg_gain;
            avg_loss = alpha * (-ch).max(0.0) + (1.0 - alpha) * avg_loss;
            result[k + 1] = rsi_from_averages(avg_gain, avg_loss);
        }

        result
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        (100.0 - 100.0 / (1.0 + avg_gain / avg_loss)).clamp(0.0, 100.0)
    }
}
