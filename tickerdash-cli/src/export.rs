//! Output formats for `show` — table, JSON and CSV.
//!
//! - **Table**: the two metrics plus the last N rows of bars and indicators
//! - **JSON**: the full dashboard
//! - **CSV**: every row, one column per indicator

use anyhow::{Context, Result};
use tickerdash_core::format;
use tickerdash_core::pipeline::Dashboard;

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(dash: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dash).context("failed to serialize dashboard to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Columns: date, open, high, low, close, volume, then one column per
/// indicator named after its window (e.g. `sma_20`). Warmup cells are empty.
pub fn export_csv(dash: &Dashboard) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let config = &dash.indicators.config;

    wtr.write_record([
        "date".to_string(),
        "open".to_string(),
        "high".to_string(),
        "low".to_string(),
        "close".to_string(),
        "volume".to_string(),
        format!("sma_{}", config.sma_fast),
        format!("sma_{}", config.sma_slow),
        format!("rsi_{}", config.rsi),
        "macd".to_string(),
        "macd_signal".to_string(),
    ])?;

    let cell = |v: Option<f64>| v.map(|v| format!("{v:.6}")).unwrap_or_default();
    let series = &dash.indicators;
    for (i, bar) in dash.bars.iter().enumerate() {
        wtr.write_record([
            bar.date.to_string(),
            format!("{:.4}", bar.open),
            format!("{:.4}", bar.high),
            format!("{:.4}", bar.low),
            format!("{:.4}", bar.close),
            bar.volume.to_string(),
            cell(series.sma_fast[i]),
            cell(series.sma_slow[i]),
            cell(series.rsi[i]),
            cell(series.macd[i]),
            cell(series.macd_signal[i]),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Table ──────────────────────────────────────────────────────────

pub fn render_table(dash: &Dashboard, rows: usize) -> String {
    let series = &dash.indicators;
    let mut out = String::new();

    out.push_str(&format!("Symbol:     {} ({} daily)\n", dash.symbol, dash.range));
    out.push_str(&format!("Last Price: {}\n", format::price(dash.last_close)));
    out.push_str(&format!("Volume:     {}\n\n", format::volume(dash.last_volume)));

    out.push_str(&format!(
        "{:<10} {:>10} {:>14} {:>10} {:>10} {:>8} {:>9} {:>9}\n",
        "Date",
        "Close",
        "Volume",
        series.sma_fast_label(),
        series.sma_slow_label(),
        series.rsi_label(),
        "MACD",
        "Signal"
    ));
    out.push_str(&format!("{}\n", "-".repeat(87)));

    let start = dash.bars.len().saturating_sub(rows);
    for (i, bar) in dash.bars.iter().enumerate().skip(start) {
        out.push_str(&format!(
            "{:<10} {:>10.2} {:>14} {:>10} {:>10} {:>8} {:>9} {:>9}\n",
            bar.date,
            bar.close,
            format::volume(bar.volume),
            format::optional(series.sma_fast[i], 2),
            format::optional(series.sma_slow[i], 2),
            format::optional(series.rsi[i], 1),
            format::optional(series.macd[i], 3),
            format::optional(series.macd_signal[i], 3),
        ));
    }
    out
}
