//! Overlay widgets — help and error history.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use tickerdash_core::pipeline::PipelineError;

use crate::app::{fetch_error_message, AppState, NO_DATA_MESSAGE};
use crate::theme;
use crate::ui::centered_rect;

/// User-facing text and style for a failed refresh.
pub fn pipeline_message(err: &PipelineError) -> (String, Style) {
    match err {
        PipelineError::NoDataFound { .. } => (NO_DATA_MESSAGE.to_string(), theme::warning()),
        PipelineError::FetchFailed { message, .. } => {
            (fetch_error_message(message), theme::negative())
        }
    }
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keyboard Shortcuts [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Search");
    key(&mut lines, "i or /", "Edit the symbol / company field");
    key(&mut lines, "Enter / Esc", "Submit / cancel while editing");
    key(&mut lines, "m", "Toggle search by Symbol / Name");
    key(&mut lines, "j / k", "Move through company suggestions");
    key(&mut lines, "Enter", "Load the highlighted company");
    lines.push(Line::from(""));

    section(&mut lines, "Charts");
    key(&mut lines, "1-3", "Price & Volume, Moving Averages, Indicators");
    key(&mut lines, "Tab / Shift+Tab", "Cycle tabs forward / back");
    key(&mut lines, "r", "Fetch again");
    lines.push(Line::from(""));

    section(&mut lines, "General");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.range(start..end).enumerate() {
        let style = if i == 0 {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(format!("{} ", err.symbol), theme::accent()),
            Span::styled(err.message.as_str(), style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(err.context.as_str(), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
