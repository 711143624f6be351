//! Chart tabs — price & volume, moving averages, RSI and MACD.
//!
//! X axis is the bar index; labels show the first, middle and last dates.
//! Warmup positions are left out of each dataset rather than drawn as zero.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

use tickerdash_core::pipeline::Dashboard;

use crate::app::Tab;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, dash: &Dashboard, tab: Tab) {
    match tab {
        Tab::PriceVolume => render_price_volume(f, area, dash),
        Tab::MovingAverages => render_moving_averages(f, area, dash),
        Tab::Indicators => render_indicators(f, area, dash),
    }
}

fn render_price_volume(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let rows = split_vertical(area, 70);

    let high = points(dash.bars.iter().map(|b| Some(b.high)));
    let low = points(dash.bars.iter().map(|b| Some(b.low)));
    let open = points(dash.bars.iter().map(|b| Some(b.open)));
    let close = points(dash.bars.iter().map(|b| Some(b.close)));
    let datasets = vec![
        line("High", theme::POSITIVE, &high),
        line("Low", theme::NEGATIVE, &low),
        line("Open", theme::MUTED, &open),
        line("Close", theme::ACCENT, &close),
    ];
    let bounds = y_bounds(&[&high[..], &low[..]]);
    f.render_widget(
        chart(datasets, dash, bounds, "Price", |v| format!("{v:.2}")),
        rows[0],
    );

    let volume = points(dash.bars.iter().map(|b| Some(b.volume as f64)));
    let max_volume = volume.iter().map(|p| p.1).fold(0.0, f64::max).max(1.0);
    let datasets = vec![Dataset::default()
        .name("Volume")
        .marker(symbols::Marker::HalfBlock)
        .style(Style::default().fg(theme::NEUTRAL))
        .graph_type(GraphType::Bar)
        .data(&volume)];
    f.render_widget(
        chart(datasets, dash, [0.0, max_volume], "Volume", compact_volume),
        rows[1],
    );
}

fn render_moving_averages(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let series = &dash.indicators;
    let close = points(dash.bars.iter().map(|b| Some(b.close)));
    let fast = points(series.sma_fast.iter().copied());
    let slow = points(series.sma_slow.iter().copied());

    let bounds = y_bounds(&[&close[..], &fast[..], &slow[..]]);
    let datasets = vec![
        line("Close", theme::ACCENT, &close),
        line(&series.sma_fast_label(), theme::NEUTRAL, &fast),
        line(&series.sma_slow_label(), theme::WARNING, &slow),
    ];
    f.render_widget(
        chart(datasets, dash, bounds, "Price", |v| format!("{v:.2}")),
        area,
    );
}

fn render_indicators(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let rows = split_vertical(area, 50);
    let series = &dash.indicators;
    let x_max = x_max(dash);

    let rsi = points(series.rsi.iter().copied());
    let overbought = [(0.0, theme::RSI_OVERBOUGHT), (x_max, theme::RSI_OVERBOUGHT)];
    let oversold = [(0.0, theme::RSI_OVERSOLD), (x_max, theme::RSI_OVERSOLD)];
    let datasets = vec![
        line(&series.rsi_label(), theme::ACCENT, &rsi),
        line("70", theme::NEGATIVE, &overbought),
        line("30", theme::POSITIVE, &oversold),
    ];
    f.render_widget(
        chart(datasets, dash, [0.0, 100.0], "RSI", |v| format!("{v:.0}")),
        rows[0],
    );

    let macd = points(series.macd.iter().copied());
    let signal = points(series.macd_signal.iter().copied());
    let zero = [(0.0, 0.0), (x_max, 0.0)];
    let bounds = y_bounds(&[&macd[..], &signal[..], &zero[..]]);
    let datasets = vec![
        line(&series.macd_label(), theme::ACCENT, &macd),
        line(&series.signal_label(), theme::WARNING, &signal),
        line("0", theme::MUTED, &zero),
    ];
    f.render_widget(
        chart(datasets, dash, bounds, "MACD", |v| format!("{v:.2}")),
        rows[1],
    );
}

// ── Helpers ──────────────────────────────────────────────────────────

fn split_vertical(area: Rect, top_percent: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(top_percent),
            Constraint::Percentage(100 - top_percent),
        ])
        .split(area)
}

/// Index-keyed points, skipping undefined values.
pub fn points(values: impl Iterator<Item = Option<f64>>) -> Vec<(f64, f64)> {
    values
        .enumerate()
        .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i as f64, v)))
        .collect()
}

/// Min/max over every dataset, padded by 5%. Flat data gets a unit band.
pub fn y_bounds(sets: &[&[(f64, f64)]]) -> [f64; 2] {
    let (min, max) = sets
        .iter()
        .flat_map(|s| s.iter().map(|p| p.1))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let padding = ((max - min) * 0.05).max(0.5);
    [min - padding, max + padding]
}

fn x_max(dash: &Dashboard) -> f64 {
    dash.bars.len().saturating_sub(1).max(1) as f64
}

fn line<'a>(name: &str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name.to_string())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(data)
}

fn chart<'a>(
    datasets: Vec<Dataset<'a>>,
    dash: &Dashboard,
    bounds: [f64; 2],
    y_title: &'a str,
    y_label: impl Fn(f64) -> String,
) -> Chart<'a> {
    let date = |i: usize| {
        dash.bars
            .get(i)
            .map(|b| b.date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let last = dash.bars.len().saturating_sub(1);
    let x_labels = vec![
        Span::styled(date(0), theme::muted()),
        Span::styled(date(last / 2), theme::muted()),
        Span::styled(date(last), theme::muted()),
    ];
    let mid = (bounds[0] + bounds[1]) / 2.0;
    let y_labels = vec![
        Span::styled(y_label(bounds[0]), theme::muted()),
        Span::styled(y_label(mid), theme::muted()),
        Span::styled(y_label(bounds[1]), theme::muted()),
    ];

    Chart::new(datasets)
        .block(Block::default())
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max(dash)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_title, theme::muted()))
                .style(theme::muted())
                .bounds(bounds)
                .labels(y_labels),
        )
}

/// `48.1M`, `512.0K`.
pub fn compact_volume(v: f64) -> String {
    if v >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}
