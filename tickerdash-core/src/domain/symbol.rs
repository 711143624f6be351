//! Validated ticker symbols.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_SYMBOL_LEN: usize = 16;

/// Why a string was rejected as a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol is empty")]
    Empty,

    #[error("symbol is {len} characters long (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("invalid character '{ch}' at position {index}")]
    InvalidChar { ch: char, index: usize },
}

/// A ticker that passed validation and is ready to hand to a market-data provider.
///
/// Normalized to uppercase. Accepts the punctuation Yahoo uses for indices
/// (`^GSPC`), share classes (`BRK-B`), exchange suffixes (`0700.HK`) and FX
/// pairs (`EURUSD=X`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResolvedSymbol(String);

impl ResolvedSymbol {
    pub fn parse(input: &str) -> Result<Self, SymbolError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(SymbolError::TooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric()
                || matches!(ch, '.' | '-' | '=')
                || (ch == '^' && index == 0);
            if !valid {
                return Err(SymbolError::InvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ResolvedSymbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResolvedSymbol> for String {
    fn from(value: ResolvedSymbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes() {
        assert_eq!(ResolvedSymbol::parse(" aapl ").unwrap().as_str(), "AAPL");
    }

    #[test]
    fn accepts_yahoo_punctuation() {
        for s in ["^GSPC", "BRK-B", "0700.HK", "EURUSD=X"] {
            assert!(ResolvedSymbol::parse(s).is_ok(), "{s} should parse");
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ResolvedSymbol::parse("   "), Err(SymbolError::Empty));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = ResolvedSymbol::parse("AAPL$").unwrap_err();
        assert!(matches!(err, SymbolError::InvalidChar { ch: '$', index: 4 }));
        assert!(ResolvedSymbol::parse("AA^PL").is_err());
        assert!(ResolvedSymbol::parse("Apple Inc").is_err());
    }

    #[test]
    fn rejects_too_long() {
        let err = ResolvedSymbol::parse("ABCDEFGHIJKLMNOPQ").unwrap_err();
        assert!(matches!(err, SymbolError::TooLong { len: 17, .. }));
    }

    #[test]
    fn serde_validates() {
        let ok: ResolvedSymbol = serde_json::from_str("\"msft\"").unwrap();
        assert_eq!(ok.as_str(), "MSFT");
        assert!(serde_json::from_str::<ResolvedSymbol>("\"bad sym\"").is_err());
    }
}
