//! Indicator pipeline: fetch history for one symbol, derive indicators.
//!
//! Either the full bar sequence with every indicator, or an error. There is
//! no partial result and no retry.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::IndicatorConfig;
use crate::data::MarketDataProvider;
use crate::domain::{Bar, HistoryRange, ResolvedSymbol};
use crate::indicators::{defined, Indicator, Macd, Rsi, Sma};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("No data found for {symbol}")]
    NoDataFound { symbol: ResolvedSymbol },

    #[error("failed to fetch {symbol}: {message}")]
    FetchFailed {
        symbol: ResolvedSymbol,
        message: String,
    },
}

impl PipelineError {
    pub fn symbol(&self) -> &ResolvedSymbol {
        match self {
            Self::NoDataFound { symbol } | Self::FetchFailed { symbol, .. } => symbol,
        }
    }
}

/// Indicator values aligned by index with the bars. `None` marks warmup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub config: IndicatorConfig,
    pub sma_fast: Vec<Option<f64>>,
    pub sma_slow: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.sma_fast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma_fast.is_empty()
    }

    pub fn sma_fast_label(&self) -> String {
        format!("SMA {}", self.config.sma_fast)
    }

    pub fn sma_slow_label(&self) -> String {
        format!("SMA {}", self.config.sma_slow)
    }

    pub fn rsi_label(&self) -> String {
        format!("RSI {}", self.config.rsi)
    }

    pub fn macd_label(&self) -> String {
        format!("MACD {}/{}", self.config.macd_fast, self.config.macd_slow)
    }

    pub fn signal_label(&self) -> String {
        format!("Signal {}", self.config.macd_signal)
    }
}

/// Result of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub symbol: ResolvedSymbol,
    pub range: HistoryRange,
    pub bars: Vec<Bar>,
    pub indicators: IndicatorSeries,
    pub last_close: f64,
    pub last_volume: u64,
}

/// Derive every indicator from `bars`.
///
/// # Panics
/// If `config` has a zero window or inverted MACD periods; configs are
/// validated when loaded.
pub fn compute_indicators(bars: &[Bar], config: &IndicatorConfig) -> IndicatorSeries {
    let sma_fast = Sma::new(config.sma_fast).compute(bars);
    let sma_slow = Sma::new(config.sma_slow).compute(bars);
    let rsi = Rsi::new(config.rsi).compute(bars);
    let lines = Macd::new(config.macd_fast, config.macd_slow, config.macd_signal)
        .compute_lines(bars);

    IndicatorSeries {
        config: *config,
        sma_fast: defined(sma_fast),
        sma_slow: defined(sma_slow),
        rsi: defined(rsi),
        macd: defined(lines.macd),
        macd_signal: defined(lines.signal),
    }
}

/// Fetch `range` of daily history for `symbol` and compute the dashboard.
pub fn run(
    provider: &dyn MarketDataProvider,
    symbol: &ResolvedSymbol,
    range: HistoryRange,
    config: &IndicatorConfig,
) -> Result<Dashboard, PipelineError> {
    let bars = provider
        .fetch_history(symbol, range)
        .map_err(|e| PipelineError::FetchFailed {
            symbol: symbol.clone(),
            message: e.to_string(),
        })?;

    let Some(last) = bars.last() else {
        return Err(PipelineError::NoDataFound {
            symbol: symbol.clone(),
        });
    };
    let (last_close, last_volume) = (last.close, last.volume);

    let indicators = compute_indicators(&bars, config);
    debug!(
        %symbol,
        provider = provider.name(),
        bars = bars.len(),
        "indicators computed"
    );

    Ok(Dashboard {
        symbol: symbol.clone(),
        range,
        bars,
        indicators,
        last_close,
        last_volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    struct FixedProvider(Result<Vec<Bar>, String>);

    impl MarketDataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_history(
            &self,
            _symbol: &ResolvedSymbol,
            _range: HistoryRange,
        ) -> Result<Vec<Bar>, DataError> {
            self.0.clone().map_err(DataError::NetworkUnreachable)
        }
    }

    fn sym() -> ResolvedSymbol {
        ResolvedSymbol::parse("AAPL").unwrap()
    }

    #[test]
    fn empty_history_is_no_data() {
        let provider = FixedProvider(Ok(vec![]));
        let err = run(&provider, &sym(), HistoryRange::SixMonths, &IndicatorConfig::default())
            .unwrap_err();
        assert_eq!(err, PipelineError::NoDataFound { symbol: sym() });
    }

    #[test]
    fn fetch_error_carries_message() {
        let provider = FixedProvider(Err("timed out".into()));
        let err = run(&provider, &sym(), HistoryRange::SixMonths, &IndicatorConfig::default())
            .unwrap_err();
        match err {
            PipelineError::FetchFailed { symbol, message } => {
                assert_eq!(symbol, sym());
                assert!(message.contains("timed out"));
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[test]
    fn dashboard_surfaces_last_bar() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let mut bars = make_bars(&closes);
        bars.last_mut().unwrap().volume = 48_123_456;
        let provider = FixedProvider(Ok(bars));

        let dash = run(&provider, &sym(), HistoryRange::SixMonths, &IndicatorConfig::default())
            .unwrap();
        assert_eq!(dash.bars.len(), 60);
        assert_eq!(dash.indicators.len(), 60);
        assert_eq!(dash.last_close, 159.0);
        assert_eq!(dash.last_volume, 48_123_456);
    }

    #[test]
    fn warmup_boundaries_with_defaults() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = compute_indicators(&make_bars(&closes), &IndicatorConfig::default());

        let first = |v: &[Option<f64>]| v.iter().position(Option::is_some);
        assert_eq!(first(&series.sma_fast), Some(19));
        assert_eq!(first(&series.sma_slow), Some(49));
        assert_eq!(first(&series.rsi), Some(14));
        assert_eq!(first(&series.macd), Some(25));
        assert_eq!(first(&series.macd_signal), Some(33));

        let mean: f64 = closes[10..60].iter().sum::<f64>() / 50.0;
        assert_approx(series.sma_slow[59].unwrap(), mean, DEFAULT_EPSILON);
    }

    #[test]
    fn short_history_is_all_warmup() {
        let series = compute_indicators(&make_bars(&[10.0, 11.0, 12.0]), &IndicatorConfig::default());
        assert_eq!(series.len(), 3);
        assert!(series.sma_fast.iter().all(Option::is_none));
        assert!(series.macd_signal.iter().all(Option::is_none));
    }

    #[test]
    fn labels_follow_config() {
        let series = compute_indicators(&[], &IndicatorConfig::default());
        assert!(series.is_empty());
        assert_eq!(series.sma_fast_label(), "SMA 20");
        assert_eq!(series.sma_slow_label(), "SMA 50");
        assert_eq!(series.rsi_label(), "RSI 14");
        assert_eq!(series.macd_label(), "MACD 12/26");
        assert_eq!(series.signal_label(), "Signal 9");
    }
}
