//! Offline data source.
//!
//! Generates a seeded random walk per symbol so the dashboard can run
//! without network access. The same (seed, symbol, end date) always yields
//! the same bars. Name search runs against the built-in `Directory`, and
//! symbols outside it have no history.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::directory::Directory;
use super::provider::{DataError, MarketDataProvider, SearchProvider, SearchRecord};
use crate::domain::{Bar, HistoryRange, ResolvedSymbol};

pub struct SyntheticProvider {
    seed: u64,
    end: Option<NaiveDate>,
    directory: Directory,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            end: None,
            directory: Directory::default_us(),
        }
    }

    /// Pin the last generated session instead of using today's date.
    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    fn symbol_seed(&self, symbol: &str) -> u64 {
        // FNV-1a: stable across platforms and toolchains.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in symbol.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        hash ^ self.seed
    }

    fn generate(&self, symbol: &str, days: &[NaiveDate]) -> Vec<Bar> {
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let mut close: f64 = rng.gen_range(20.0..400.0);
        let drift: f64 = rng.gen_range(-0.001..0.0015);
        let base_volume: u64 = rng.gen_range(2_000_000..60_000_000);

        days.iter()
            .map(|&date| {
                let open = close * (1.0 + rng.gen_range(-0.006..0.006));
                close = (open * (1.0 + drift + rng.gen_range(-0.02..0.02))).max(1.0);
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.012));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.012));
                let volume = (base_volume as f64 * rng.gen_range(0.5..1.8)) as u64;
                Bar {
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume,
                }
            })
            .collect()
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_history(
        &self,
        symbol: &ResolvedSymbol,
        range: HistoryRange,
    ) -> Result<Vec<Bar>, DataError> {
        if !self.directory.contains_symbol(symbol.as_str()) {
            return Ok(Vec::new());
        }
        let end = self
            .end
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let days = range.weekdays_until(end);
        Ok(self.generate(symbol.as_str(), &days))
    }
}

impl SearchProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic_directory"
    }

    fn search(&self, query: &str) -> Result<Vec<SearchRecord>, DataError> {
        Ok(self.directory.search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SyntheticProvider {
        SyntheticProvider::new(42).with_end_date(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
    }

    fn sym(s: &str) -> ResolvedSymbol {
        ResolvedSymbol::parse(s).unwrap()
    }

    #[test]
    fn deterministic_per_symbol() {
        let p = provider();
        let a = p.fetch_history(&sym("AAPL"), HistoryRange::SixMonths).unwrap();
        let b = p.fetch_history(&sym("AAPL"), HistoryRange::SixMonths).unwrap();
        let c = p.fetch_history(&sym("MSFT"), HistoryRange::SixMonths).unwrap();
        assert_eq!(a, b);
        assert_ne!(a[0].close, c[0].close);
    }

    #[test]
    fn six_months_of_sane_bars() {
        let bars = provider()
            .fetch_history(&sym("NVDA"), HistoryRange::SixMonths)
            .unwrap();
        assert!(bars.len() >= 120 && bars.len() <= 135, "got {}", bars.len());
        assert!(bars.iter().all(Bar::is_sane));
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn unknown_symbol_has_no_history() {
        let bars = provider()
            .fetch_history(&sym("ZZZZ"), HistoryRange::SixMonths)
            .unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn search_uses_directory() {
        let hits = provider().search("micro").unwrap();
        assert_eq!(hits[0].symbol.as_deref(), Some("MSFT"));
    }
}
