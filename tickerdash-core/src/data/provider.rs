//! Collaborator traits and structured error types.
//!
//! The market-data and name-search collaborators are traits so the Yahoo
//! client can be swapped for the offline synthetic provider or a test double.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bar, HistoryRange, ResolvedSymbol};

/// Errors raised by a data collaborator.
///
/// Displayable as-is in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {provider}")]
    Http { provider: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider setup failed: {0}")]
    Setup(String),
}

/// One record returned by the name-search collaborator.
///
/// Either field may be missing; the resolver drops incomplete records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

impl SearchRecord {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            symbol: Some(symbol.into()),
        }
    }
}

/// Market-data collaborator: daily history for one symbol.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars covering `range`, ending at the latest session.
    ///
    /// An unknown or delisted symbol yields `Ok` with an empty vector; `Err`
    /// is reserved for the call itself failing.
    fn fetch_history(
        &self,
        symbol: &ResolvedSymbol,
        range: HistoryRange,
    ) -> Result<Vec<Bar>, DataError>;
}

/// Name-search collaborator: free text in, candidate records out.
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    fn search(&self, query: &str) -> Result<Vec<SearchRecord>, DataError>;
}
