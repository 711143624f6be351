//! TickerDash TUI — single-screen stock dashboard.
//!
//! Layout:
//! - Sidebar — search mode, symbol / company input, suggestions
//! - Metrics — last price, volume, latest RSI and MACD
//! - Tabs — Price & Volume, Moving Averages, Indicators
//! - Status bar — key hints and the last message
//!
//! Every interaction runs one synchronous refresh; a loading frame is drawn
//! before the blocking fetch.

mod app;
mod input;
mod theme;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tickerdash_core::config::{AppConfig, ProviderKind};
use tickerdash_core::data::build_source;
use tickerdash_core::resolver::ResolveMode;

use crate::app::AppState;

#[derive(Parser)]
#[command(name = "tickerdash", about = "Terminal stock dashboard", version)]
struct Args {
    /// Config file (default: <config dir>/tickerdash/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the offline synthetic provider instead of Yahoo Finance
    #[arg(long)]
    offline: bool,

    /// Initial ticker symbol
    #[arg(long)]
    symbol: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref()).context("loading config")?;
    if args.offline {
        config.provider.kind = ProviderKind::Synthetic;
    }
    if let Some(symbol) = args.symbol {
        config.defaults.mode = ResolveMode::BySymbol;
        config.defaults.symbol = symbol;
    }

    let log_path = init_logging();
    info!(log = ?log_path, provider = ?config.provider.kind, "starting tickerdash");

    let source = build_source(&config.provider).context("building data provider")?;
    let mut app = AppState::new(source, &config);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Refresh if an interaction asked for one
        if app.pending_refresh {
            app.loading = true;
            terminal.draw(|f| ui::draw(f, app))?;
            app.refresh();
            app.loading = false;
            continue;
        }

        // 3. Poll for input events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `<data dir>/tickerdash/tickerdash.log`; the terminal is in raw mode.
/// Logging stays off if the file cannot be opened.
fn init_logging() -> Option<PathBuf> {
    let dir = dirs::data_local_dir()?.join("tickerdash");
    std::fs::create_dir_all(&dir).ok()?;
    let path = dir.join("tickerdash.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Some(path)
}
