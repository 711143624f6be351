//! TickerDash CLI — search, show and config commands.
//!
//! Commands:
//! - `search` — list matching companies as `Name (SYMBOL)`
//! - `show` — run one refresh and print metrics, bars and indicators
//! - `config` — print the effective configuration as TOML

mod export;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tickerdash_core::config::{AppConfig, ProviderKind};
use tickerdash_core::dashboard::{refresh, DashboardRequest};
use tickerdash_core::data::{build_source, DataSource};
use tickerdash_core::domain::HistoryRange;
use tickerdash_core::resolver::{ResolveMode, Resolver};

#[derive(Parser)]
#[command(
    name = "tickerdash-cli",
    about = "TickerDash CLI — stock lookup and indicators",
    version
)]
struct Cli {
    /// Config file (default: <config dir>/tickerdash/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the offline synthetic provider.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search companies by name.
    Search {
        /// Company name or fragment.
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Fetch history for one symbol and print indicators.
    Show {
        /// Ticker symbol, or company name with --by-name.
        #[arg(required = true)]
        query: Vec<String>,

        /// Treat the query as a company name.
        #[arg(long, default_value_t = false)]
        by_name: bool,

        /// Which search result to use (1-based). Out of range picks the first.
        #[arg(long, default_value_t = 1)]
        pick: usize,

        /// History window: 1mo, 3mo, 6mo, 1y, 2y, 5y. Defaults to the config.
        #[arg(long)]
        range: Option<HistoryRange>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Rows shown by the table format.
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    if cli.offline {
        config.provider.kind = ProviderKind::Synthetic;
    }
    debug!(provider = ?config.provider.kind, range = %config.history.range, "config loaded");

    match cli.command {
        Commands::Search { query } => {
            let source = build_source(&config.provider)?;
            run_search(source.as_ref(), &query.join(" "));
            Ok(())
        }
        Commands::Show {
            query,
            by_name,
            pick,
            range,
            format,
            rows,
        } => {
            let source = build_source(&config.provider)?;
            let mode = if by_name {
                ResolveMode::ByName
            } else {
                ResolveMode::BySymbol
            };
            let request = DashboardRequest::new(mode, query.join(" "))
                .with_selection(pick.saturating_sub(1))
                .with_range(range.unwrap_or(config.history.range));
            run_show(source.as_ref(), &request, &config, format, rows)
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn run_search(source: &dyn DataSource, query: &str) {
    let resolver = Resolver::new(source.as_search());
    for candidate in resolver.resolve(query, ResolveMode::ByName) {
        println!("{}", candidate.label());
    }
}

fn run_show(
    source: &dyn DataSource,
    request: &DashboardRequest,
    config: &AppConfig,
    format: OutputFormat,
    rows: usize,
) -> Result<()> {
    let resolver = Resolver::new(source.as_search());
    let outcome = refresh(&resolver, source.as_market(), request, &config.indicators);

    let dash = match outcome.report {
        Some(Ok(dash)) => dash,
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: no symbol matches '{}'", request.query.trim());
            std::process::exit(1);
        }
    };

    match format {
        OutputFormat::Table => print!("{}", export::render_table(&dash, rows)),
        OutputFormat::Json => println!("{}", export::export_json(&dash)?),
        OutputFormat::Csv => print!("{}", export::export_csv(&dash)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_options() {
        let cli = Cli::try_parse_from([
            "tickerdash-cli",
            "--offline",
            "show",
            "apple",
            "inc",
            "--by-name",
            "--pick",
            "2",
            "--range",
            "1y",
            "--format",
            "csv",
        ])
        .unwrap();
        assert!(cli.offline);
        match cli.command {
            Commands::Show {
                query,
                by_name,
                pick,
                range,
                format,
                rows,
            } => {
                assert_eq!(query.join(" "), "apple inc");
                assert!(by_name);
                assert_eq!(pick, 2);
                assert_eq!(range, Some(HistoryRange::OneYear));
                assert_eq!(format, OutputFormat::Csv);
                assert_eq!(rows, 10);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn rejects_unknown_range() {
        assert!(Cli::try_parse_from(["tickerdash-cli", "show", "AAPL", "--range", "7w"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tickerdash-cli", "search", "tesla", "--offline"]).unwrap();
        assert!(cli.offline);
        assert!(matches!(cli.command, Commands::Search { .. }));
    }
}
