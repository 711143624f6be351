//! Metrics row — last price and volume, plus the latest indicator readings.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tickerdash_core::format;
use tickerdash_core::pipeline::Dashboard;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let Some(dash) = app.dashboard() else {
        for (i, title) in ["Last Price", "Volume", "RSI", "MACD"].iter().enumerate() {
            card(f, cards[i], title, format::UNDEFINED.to_string(), theme::muted(), None);
        }
        return;
    };

    let change = day_change(dash);
    card(
        f,
        cards[0],
        "Last Price",
        format::price(dash.last_close),
        theme::text(),
        change.map(|(delta, pct)| {
            Span::styled(
                format!("{delta:+.2} ({pct:+.2}%)"),
                Style::default().fg(theme::change_color(delta)),
            )
        }),
    );
    card(
        f,
        cards[1],
        "Volume",
        format::volume(dash.last_volume),
        theme::text(),
        None,
    );

    let series = &dash.indicators;
    let rsi = series.rsi.last().copied().flatten();
    card(
        f,
        cards[2],
        &series.rsi_label(),
        format::optional(rsi, 1),
        rsi.map_or_else(theme::muted, |v| Style::default().fg(theme::rsi_color(v))),
        None,
    );

    let macd = series.macd.last().copied().flatten();
    let signal = series.macd_signal.last().copied().flatten();
    card(
        f,
        cards[3],
        &series.macd_label(),
        format::optional(macd, 3),
        theme::accent(),
        Some(Span::styled(
            format!("signal {}", format::optional(signal, 3)),
            theme::neutral(),
        )),
    );
}

/// Close-to-close change of the last session: (delta, percent).
pub fn day_change(dash: &Dashboard) -> Option<(f64, f64)> {
    let [.., prev, last] = dash.bars.as_slice() else {
        return None;
    };
    let delta = last.close - prev.close;
    Some((delta, delta / prev.close * 100.0))
}

fn card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    style: Style,
    detail: Option<Span<'static>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {title} "))
        .title_style(theme::muted());

    let mut spans = vec![Span::styled(value, style.add_modifier(ratatui::style::Modifier::BOLD))];
    if let Some(detail) = detail {
        spans.push(Span::raw("  "));
        spans.push(detail);
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
