//! Look-ahead contamination tests for every indicator.
//!
//! No indicator value at bar t may depend on price data from bar t+1 or later.
//!
//! Method: compute on a truncated series (bars 0..100) and the full series
//! (bars 0..200). Bars 0..100 must be identical between both runs.

use chrono::NaiveDate;
use tickerdash_core::config::IndicatorConfig;
use tickerdash_core::domain::Bar;
use tickerdash_core::indicators::*;
use tickerdash_core::pipeline::compute_indicators;

/// N bars of deterministic pseudo-random OHLCV data.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05;
        price = (price + change).max(10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        bars.push(Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: 1000 + (i as u64 * 100),
        });
    }

    bars
}

fn assert_same_prefix(name: &str, truncated: &[f64], full: &[f64]) {
    for (i, (&t, &f)) in truncated.iter().zip(full).enumerate() {
        if t.is_nan() && f.is_nan() {
            continue;
        }
        assert!(
            !t.is_nan() && !f.is_nan(),
            "{name}: NaN mismatch at bar {i} (truncated={t}, full={f})"
        );
        assert!(
            (t - f).abs() < 1e-10,
            "{name}: look-ahead contamination at bar {i}: truncated={t}, full={f}"
        );
    }
}

fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &[Bar], truncated_len: usize) {
    let truncated_result = indicator.compute(&full_bars[..truncated_len]);
    let full_result = indicator.compute(full_bars);

    assert_eq!(truncated_result.len(), truncated_len, "{}: length", indicator.name());
    assert_eq!(full_result.len(), full_bars.len(), "{}: length", indicator.name());
    assert_same_prefix(indicator.name(), &truncated_result, &full_result);
}

#[test]
fn lookahead_sma() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Sma::new(20), &bars, 100);
    assert_no_lookahead(&Sma::new(50), &bars, 100);
}

#[test]
fn lookahead_ema() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Ema::new(12), &bars, 100);
    assert_no_lookahead(&Ema::new(26), &bars, 100);
}

#[test]
fn lookahead_rsi() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Rsi::new(14), &bars, 100);
    assert_no_lookahead(&Rsi::new(7), &bars, 100);
}

#[test]
fn lookahead_macd() {
    let bars = make_test_bars(200);
    let macd = Macd::standard();
    assert_no_lookahead(&macd, &bars, 100);

    let truncated = macd.compute_lines(&bars[..100]);
    let full = macd.compute_lines(&bars);
    assert_same_prefix("MACD signal", &truncated.signal, &full.signal);
}

#[test]
fn lookahead_pipeline_series() {
    let bars = make_test_bars(200);
    let config = IndicatorConfig::default();
    let truncated = compute_indicators(&bars[..100], &config);
    let full = compute_indicators(&bars, &config);

    assert_eq!(truncated.sma_fast[..], full.sma_fast[..100]);
    assert_eq!(truncated.sma_slow[..], full.sma_slow[..100]);
    assert_eq!(truncated.rsi[..], full.rsi[..100]);
    assert_eq!(truncated.macd[..], full.macd[..100]);
    assert_eq!(truncated.macd_signal[..], full.macd_signal[..100]);
}
