//! Top-level UI layout — sidebar, header, metrics, tabs, chart body, status bar.

pub mod charts;
pub mod metrics;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Tab};
use crate::theme;

const SIDEBAR_WIDTH: u16 = 34;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        f.area(),
    );

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(main_area);

    sidebar::render(f, columns[0], app);
    draw_content(f, columns[1], app);
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

fn draw_content(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    render_header(f, rows[0], app);
    metrics::render(f, rows[1], app);
    render_tabs(f, rows[2], app.active_tab);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", app.active_tab.label()))
        .title_style(theme::panel_title(true));
    let body = block.inner(rows[3]);
    f.render_widget(block, rows[3]);

    if app.loading {
        render_notice(f, body, "Loading…", theme::muted());
    } else if let Some(dash) = app.dashboard() {
        charts::render(f, body, dash, app.active_tab);
    } else if let Some(err) = app.pipeline_error() {
        let (text, style) = overlays::pipeline_message(err);
        render_notice(f, body, &text, style);
    } else {
        render_notice(
            f,
            body,
            "Enter a symbol or company name in the sidebar (press i).",
            theme::muted(),
        );
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(" TickerDash ", theme::accent_bold())];
    if let Some(dash) = app.dashboard() {
        spans.push(Span::styled("│ ", theme::muted()));
        spans.push(Span::styled(dash.symbol.to_string(), theme::text()));
        spans.push(Span::styled(
            format!("  {} daily", dash.range),
            theme::text_secondary(),
        ));
    }
    spans.push(Span::styled(
        format!("  [{}]", app.provider_name()),
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(f: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(format!("{} {}", t.index() + 1, t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border(false)),
        )
        .select(active.index())
        .style(theme::muted())
        .highlight_style(theme::accent_bold())
        .divider(Span::styled("│", theme::muted()));
    f.render_widget(tabs, area);
}

fn render_notice(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let lines = vec![Line::from(""), Line::from(Span::styled(text.to_string(), style))];
    f.render_widget(
        Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: true }),
        area,
    );
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
