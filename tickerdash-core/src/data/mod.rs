//! Data collaborators: market history and company-name search.

pub mod directory;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

use crate::config::{ProviderConfig, ProviderKind};

pub use directory::Directory;
pub use provider::{DataError, MarketDataProvider, SearchProvider, SearchRecord};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;

/// A provider that serves both collaborators.
pub trait DataSource: MarketDataProvider + SearchProvider {
    fn as_market(&self) -> &dyn MarketDataProvider;
    fn as_search(&self) -> &dyn SearchProvider;
}

impl<T: MarketDataProvider + SearchProvider> DataSource for T {
    fn as_market(&self) -> &dyn MarketDataProvider {
        self
    }

    fn as_search(&self) -> &dyn SearchProvider {
        self
    }
}

/// Build the configured data source.
pub fn build_source(config: &ProviderConfig) -> Result<Box<dyn DataSource>, DataError> {
    match config.kind {
        ProviderKind::Yahoo => Ok(Box::new(YahooProvider::new(config)?)),
        ProviderKind::Synthetic => Ok(Box::new(SyntheticProvider::new(config.synthetic_seed))),
    }
}
