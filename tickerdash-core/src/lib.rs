//! TickerDash Core — resolver, indicator pipeline, data providers, configuration.
//!
//! This crate holds everything the dashboard and CLI share:
//! - Domain types (bars, validated symbols, history ranges)
//! - Indicators (SMA, EMA, RSI, MACD) as pure functions over bars
//! - Data collaborators (Yahoo Finance, offline synthetic) behind traits
//! - Resolver (symbol or company name to candidate tickers)
//! - Pipeline and the per-interaction refresh cycle
//! - TOML configuration and display formatting

pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod format;
pub mod indicators;
pub mod pipeline;
pub mod resolver;
