//! Built-in company directory for offline name search.
//!
//! A small list of widely held US listings. The synthetic provider searches
//! it and only serves history for symbols it contains.

use super::provider::SearchRecord;

const US_LISTINGS: &[(&str, &str)] = &[
    ("Apple Inc.", "AAPL"),
    ("Microsoft Corporation", "MSFT"),
    ("Alphabet Inc.", "GOOGL"),
    ("NVIDIA Corporation", "NVDA"),
    ("Meta Platforms, Inc.", "META"),
    ("Oracle Corporation", "ORCL"),
    ("Adobe Inc.", "ADBE"),
    ("Amazon.com, Inc.", "AMZN"),
    ("Tesla, Inc.", "TSLA"),
    ("The Coca-Cola Company", "KO"),
    ("PepsiCo, Inc.", "PEP"),
    ("Walmart Inc.", "WMT"),
    ("McDonald's Corporation", "MCD"),
    ("Apple Hospitality REIT, Inc.", "APLE"),
    ("JPMorgan Chase & Co.", "JPM"),
    ("Berkshire Hathaway Inc.", "BRK-B"),
    ("Visa Inc.", "V"),
    ("Goldman Sachs Group, Inc.", "GS"),
    ("Johnson & Johnson", "JNJ"),
    ("Pfizer Inc.", "PFE"),
    ("Eli Lilly and Company", "LLY"),
    ("UnitedHealth Group Incorporated", "UNH"),
    ("Exxon Mobil Corporation", "XOM"),
    ("Chevron Corporation", "CVX"),
];

/// Company name → symbol listings in a fixed order.
#[derive(Debug, Clone)]
pub struct Directory {
    listings: Vec<(&'static str, &'static str)>,
}

impl Directory {
    pub fn default_us() -> Self {
        Self {
            listings: US_LISTINGS.to_vec(),
        }
    }

    /// All listings in directory order.
    pub fn listings(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.listings.iter().copied()
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.listings().any(|(_, s)| s.eq_ignore_ascii_case(symbol))
    }

    /// Case-insensitive substring match on company name, or exact symbol match.
    pub fn search(&self, query: &str) -> Vec<SearchRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.listings()
            .filter(|(name, symbol)| {
                name.to_lowercase().contains(&needle) || symbol.eq_ignore_ascii_case(&needle)
            })
            .map(|(name, symbol)| SearchRecord::new(name, symbol))
            .collect()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::default_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_by_name_fragment() {
        let dir = Directory::default_us();
        let hits = dir.search("apple");
        let symbols: Vec<_> = hits.iter().filter_map(|r| r.symbol.as_deref()).collect();
        assert_eq!(symbols, vec!["AAPL", "APLE"]);
    }

    #[test]
    fn listings_keep_directory_order() {
        let dir = Directory::default_us();
        let first: Vec<_> = dir.listings().take(2).map(|(_, s)| s).collect();
        assert_eq!(first, vec!["AAPL", "MSFT"]);
        assert_eq!(dir.listings().count(), 24);
    }

    #[test]
    fn search_by_exact_symbol() {
        let hits = Directory::default_us().search("tsla");
        assert_eq!(hits, vec![SearchRecord::new("Tesla, Inc.", "TSLA")]);
    }

    #[test]
    fn search_blank_or_unknown() {
        let dir = Directory::default_us();
        assert!(dir.search("  ").is_empty());
        assert!(dir.search("zzzz no such company").is_empty());
    }

    #[test]
    fn contains_symbol_ignores_case() {
        let dir = Directory::default_us();
        assert!(dir.contains_symbol("brk-b"));
        assert!(!dir.contains_symbol("NOPE"));
    }
}
