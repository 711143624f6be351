//! TOML configuration.
//!
//! Lookup order: an explicit path (must exist), then
//! `<config dir>/tickerdash/config.toml` if present, then built-in defaults.
//! Every section and field is optional in the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::HistoryRange;
use crate::resolver::ResolveMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub history: HistoryConfig,
    pub indicators: IndicatorConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub chart_url: String,
    pub search_url: String,
    pub search_limit: usize,
    pub synthetic_seed: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            chart_url: "https://query2.finance.yahoo.com/v8/finance/chart".into(),
            search_url: "https://query2.finance.yahoo.com/v1/finance/search".into(),
            search_limit: 10,
            synthetic_seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub range: HistoryRange,
}

/// Indicator windows. Defaults: SMA 20/50, RSI 14, MACD 12/26/9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub rsi: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 50,
            rsi: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("sma_fast", self.sma_fast),
            ("sma_slow", self.sma_slow),
            ("rsi", self.rsi),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(ConfigError::Invalid(format!("indicators.{name} must be >= 1")));
        }
        if self.sma_fast >= self.sma_slow {
            return Err(ConfigError::Invalid(
                "indicators.sma_fast must be less than indicators.sma_slow".into(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::Invalid(
                "indicators.macd_fast must be less than indicators.macd_slow".into(),
            ));
        }
        Ok(())
    }
}

/// Initial inputs shown when the dashboard opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub mode: ResolveMode,
    pub symbol: String,
    pub company: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: ResolveMode::BySymbol,
            symbol: "AAPL".into(),
            company: "Apple".into(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/tickerdash/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tickerdash").join("config.toml"))
    }

    /// Resolve and load the effective configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs must be >= 1".into()));
        }
        if self.provider.search_limit == 0 {
            return Err(ConfigError::Invalid("provider.search_limit must be >= 1".into()));
        }
        self.indicators.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
