//! Symbol resolution.
//!
//! Maps free text to candidate tickers. In symbol mode the text is the
//! candidate; in name mode the search collaborator is asked for matches.
//! A failed search degrades to an empty list and is only logged.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::SearchProvider;
use crate::domain::ResolvedSymbol;

/// How the query text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolveMode {
    #[default]
    #[serde(rename = "symbol")]
    BySymbol,
    #[serde(rename = "name")]
    ByName,
}

impl ResolveMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::BySymbol => Self::ByName,
            Self::ByName => Self::BySymbol,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BySymbol => "Symbol",
            Self::ByName => "Name",
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One resolvable match: display name plus ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub symbol: ResolvedSymbol,
}

impl Candidate {
    /// `"Name (SYMBOL)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    /// Recover the symbol from a label: the text inside the last parentheses.
    pub fn symbol_from_label(label: &str) -> Option<ResolvedSymbol> {
        let open = label.rfind('(')?;
        let close = label[open..].find(')')? + open;
        ResolvedSymbol::parse(&label[open + 1..close]).ok()
    }
}

pub struct Resolver<'a> {
    search: &'a dyn SearchProvider,
}

impl<'a> Resolver<'a> {
    pub fn new(search: &'a dyn SearchProvider) -> Self {
        Self { search }
    }

    /// Produce candidates for `query`. Never fails.
    pub fn resolve(&self, query: &str, mode: ResolveMode) -> Vec<Candidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match mode {
            ResolveMode::BySymbol => match ResolvedSymbol::parse(query) {
                Ok(symbol) => vec![Candidate {
                    name: symbol.as_str().to_string(),
                    symbol,
                }],
                Err(e) => {
                    debug!(query, error = %e, "query is not a valid symbol");
                    Vec::new()
                }
            },
            ResolveMode::ByName => self.search_by_name(query),
        }
    }

    fn search_by_name(&self, query: &str) -> Vec<Candidate> {
        let records = match self.search.search(query) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    query,
                    provider = self.search.name(),
                    error = %e,
                    "name search failed; showing no suggestions"
                );
                return Vec::new();
            }
        };

        let total = records.len();
        let candidates: Vec<Candidate> = records
            .into_iter()
            .filter_map(|record| {
                let name = record.name.filter(|n| !n.trim().is_empty())?;
                let symbol = ResolvedSymbol::parse(&record.symbol?).ok()?;
                Some(Candidate { name, symbol })
            })
            .collect();

        debug!(
            query,
            records = total,
            candidates = candidates.len(),
            "name search complete"
        );
        candidates
    }
}

/// Pick one candidate. Out-of-range indices fall back to the first.
pub fn select(candidates: &[Candidate], index: usize) -> Option<&Candidate> {
    candidates.get(index).or_else(|| candidates.first())
}
