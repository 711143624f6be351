//! Keyboard input dispatch — overlays → input field → global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Tab};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. The input field captures everything while editing.
    if app.sidebar.editing.is_some() {
        handle_editing(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('i') | KeyCode::Char('/') => app.begin_edit(),
        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(true),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(false),
        KeyCode::Enter => app.pick_candidate(),
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(tab) = c.to_digit(10).and_then(|d| Tab::from_index(d as usize - 1)) {
                app.select_tab(tab);
            }
        }
        KeyCode::Tab => {
            let tab = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_tab.prev()
            } else {
                app.active_tab.next()
            };
            app.select_tab(tab);
        }
        KeyCode::BackTab => app.select_tab(app.active_tab.prev()),
        _ => {}
    }
}

fn handle_editing(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.submit_edit(),
        KeyCode::Backspace => {
            if let Some(buffer) = app.sidebar.editing.as_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = app.sidebar.editing.as_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use tickerdash_core::resolver::ResolveMode;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn edit_and_submit_symbol() {
        let mut app = test_app(ResolveMode::BySymbol);
        app.pending_refresh = false;

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.sidebar.editing.as_deref(), Some("AAPL"));
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        // 'q' is text while editing, not quit
        type_text(&mut app, "qqq");
        assert!(app.running);
        press(&mut app, KeyCode::Enter);

        assert!(app.sidebar.editing.is_none());
        assert_eq!(app.sidebar.symbol_text, "qqq");
        assert!(app.pending_refresh);
    }

    #[test]
    fn escape_cancels_edit() {
        let mut app = test_app(ResolveMode::BySymbol);
        app.pending_refresh = false;
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "MSFT");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.sidebar.symbol_text, "AAPL");
        assert!(!app.pending_refresh);
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut app = test_app(ResolveMode::BySymbol);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Indicators);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active_tab, Tab::PriceVolume);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Indicators);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::PriceVolume);
    }

    #[test]
    fn overlays_capture_keys() {
        let mut app = test_app(ResolveMode::BySymbol);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.sidebar.mode, ResolveMode::BySymbol);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn release_events_ignored() {
        let mut app = test_app(ResolveMode::BySymbol);
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }
}
