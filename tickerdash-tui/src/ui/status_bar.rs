//! Bottom status bar — key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let hints = if app.sidebar.editing.is_some() {
        " Enter:submit Esc:cancel"
    } else {
        " i:edit m:mode j/k:move Enter:pick 1-3:tabs r:refresh e:errors ?:help q:quit"
    };
    let mut spans: Vec<Span> = vec![Span::styled(hints, theme::muted()), Span::raw(" | ")];

    if app.loading {
        spans.push(Span::styled("Loading…", theme::accent()));
    } else if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
