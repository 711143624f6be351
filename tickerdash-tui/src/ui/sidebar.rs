//! Sidebar — search mode toggle, input field, suggestions, feature blurb.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use tickerdash_core::resolver::ResolveMode;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(app.sidebar.editing.is_some()))
        .title(" Stock Search ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(7),
        ])
        .split(inner);

    render_mode(f, rows[0], app.sidebar.mode);
    render_input(f, rows[1], app);
    render_suggestions(f, rows[2], app);
    render_features(f, rows[3], app);
}

fn render_mode(f: &mut Frame, area: Rect, mode: ResolveMode) {
    let radio = |m: ResolveMode| {
        let (mark, style) = if m == mode {
            ("(•) ", theme::accent_bold())
        } else {
            ("( ) ", theme::muted())
        };
        Span::styled(format!("{mark}{}", m.label()), style)
    };
    let lines = vec![
        Line::from(Span::styled("Search by  [m]", theme::muted())),
        Line::from(vec![
            radio(ResolveMode::BySymbol),
            Span::raw("  "),
            radio(ResolveMode::ByName),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_input(f: &mut Frame, area: Rect, app: &AppState) {
    let editing = app.sidebar.editing.as_deref();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(editing.is_some()))
        .title(format!(" {} ", app.sidebar.input_title()))
        .title_style(theme::muted());

    let line = match editing {
        Some(buffer) => Line::from(vec![
            Span::styled(buffer.to_string(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
        None => Line::from(Span::styled(app.sidebar.query().to_string(), theme::text())),
    };
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &AppState) {
    if app.sidebar.mode != ResolveMode::ByName {
        return;
    }

    let candidates = app.candidates();
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Select a company  [j/k, Enter]",
        theme::muted(),
    ))];

    if candidates.is_empty() {
        lines.push(Line::from(Span::styled("  no matches", theme::muted())));
    }

    let visible = area.height.saturating_sub(1) as usize;
    let start = app.sidebar.cursor.saturating_sub(visible.saturating_sub(1));
    for (i, candidate) in candidates.iter().enumerate().skip(start).take(visible) {
        let is_cursor = i == app.sidebar.cursor;
        let is_picked = i == app.sidebar.picked;
        let marker = if is_picked { "● " } else { "  " };
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_picked {
            theme::accent()
        } else {
            theme::text_secondary()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::positive()),
            Span::styled(candidate.label(), style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_features(f: &mut Frame, area: Rect, app: &AppState) {
    let config = &app.indicators;
    let bullet = |text: String| Line::from(Span::styled(format!("• {text}"), theme::muted()));

    let lines = vec![
        Line::from(Span::styled("Features", theme::neutral())),
        bullet("Daily price history".into()),
        bullet(format!("Moving averages ({}/{})", config.sma_fast, config.sma_slow)),
        bullet(format!("RSI {}", config.rsi)),
        bullet(format!(
            "MACD {}/{}/{}",
            config.macd_fast, config.macd_slow, config.macd_signal
        )),
        bullet("Volume analysis".into()),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
