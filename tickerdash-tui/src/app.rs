//! Application state — single-owner, main-thread only.
//!
//! The state holds the current inputs and the last refresh outcome. Every
//! interaction that needs data builds a fresh `DashboardRequest` from the
//! inputs; nothing else carries over between refreshes.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use tracing::debug;

use tickerdash_core::config::{AppConfig, IndicatorConfig};
use tickerdash_core::dashboard::{self, DashboardRequest, Outcome};
use tickerdash_core::data::DataSource;
use tickerdash_core::domain::HistoryRange;
use tickerdash_core::pipeline::{Dashboard, PipelineError};
use tickerdash_core::resolver::{Candidate, ResolveMode, Resolver};

pub const NO_DATA_MESSAGE: &str =
    "No data found for this symbol. Please check the symbol and try again.";

const ERROR_HISTORY_CAP: usize = 50;

pub fn fetch_error_message(message: &str) -> String {
    format!("Error fetching or displaying stock data: {message}")
}

/// Which chart tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    PriceVolume,
    MovingAverages,
    Indicators,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::PriceVolume, Tab::MovingAverages, Tab::Indicators];

    pub fn index(self) -> usize {
        match self {
            Tab::PriceVolume => 0,
            Tab::MovingAverages => 1,
            Tab::Indicators => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::PriceVolume => "Price & Volume",
            Tab::MovingAverages => "Moving Averages",
            Tab::Indicators => "Indicators",
        }
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NoData,
    Fetch,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::NoData => "DATA",
            ErrorCategory::Fetch => "NET",
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub symbol: String,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Sidebar inputs: mode toggle, the two text fields and the suggestion cursor.
#[derive(Debug, Clone)]
pub struct SidebarState {
    pub mode: ResolveMode,
    pub symbol_text: String,
    pub company_text: String,
    /// `Some` while the input field is being edited.
    pub editing: Option<String>,
    /// Highlighted suggestion.
    pub cursor: usize,
    /// Suggestion the current dashboard was built from.
    pub picked: usize,
}

impl SidebarState {
    pub fn new(mode: ResolveMode, symbol: &str, company: &str) -> Self {
        Self {
            mode,
            symbol_text: symbol.to_string(),
            company_text: company.to_string(),
            editing: None,
            cursor: 0,
            picked: 0,
        }
    }

    /// Text of the field that belongs to the current mode.
    pub fn query(&self) -> &str {
        match self.mode {
            ResolveMode::BySymbol => &self.symbol_text,
            ResolveMode::ByName => &self.company_text,
        }
    }

    pub fn input_title(&self) -> &'static str {
        match self.mode {
            ResolveMode::BySymbol => "Stock Symbol",
            ResolveMode::ByName => "Company Name",
        }
    }

    fn set_query(&mut self, text: String) {
        match self.mode {
            ResolveMode::BySymbol => self.symbol_text = text,
            ResolveMode::ByName => self.company_text = text,
        }
        self.cursor = 0;
        self.picked = 0;
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub active_tab: Tab,
    pub overlay: Overlay,
    pub sidebar: SidebarState,
    pub range: HistoryRange,
    pub indicators: IndicatorConfig,

    source: Box<dyn DataSource>,
    pub outcome: Option<Outcome>,
    /// Set by input handlers; the main loop draws a loading frame and refreshes.
    pub pending_refresh: bool,
    pub loading: bool,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl AppState {
    pub fn new(source: Box<dyn DataSource>, config: &AppConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            running: true,
            active_tab: Tab::PriceVolume,
            overlay: Overlay::None,
            sidebar: SidebarState::new(defaults.mode, &defaults.symbol, &defaults.company),
            range: config.history.range,
            indicators: config.indicators,
            source,
            outcome: None,
            pending_refresh: true,
            loading: false,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.source.as_market().name()
    }

    pub fn request_refresh(&mut self) {
        self.pending_refresh = true;
    }

    /// Build the request for the current inputs.
    pub fn request(&self) -> DashboardRequest {
        DashboardRequest::new(self.sidebar.mode, self.sidebar.query())
            .with_selection(self.sidebar.picked)
            .with_range(self.range)
    }

    /// Run one refresh cycle synchronously and record its outcome.
    pub fn refresh(&mut self) {
        self.pending_refresh = false;
        let request = self.request();
        debug!(?request, "refreshing");

        let resolver = Resolver::new(self.source.as_search());
        let outcome = dashboard::refresh(
            &resolver,
            self.source.as_market(),
            &request,
            &self.indicators,
        );

        let last = outcome.candidates.len().saturating_sub(1);
        self.sidebar.cursor = self.sidebar.cursor.min(last);
        self.sidebar.picked = self.sidebar.picked.min(last);

        match &outcome.report {
            Some(Ok(dash)) => self.set_status(format!(
                "{}: {} sessions ({})",
                dash.symbol,
                dash.bars.len(),
                dash.range
            )),
            Some(Err(e @ PipelineError::NoDataFound { .. })) => {
                self.push_error(ErrorCategory::NoData, e, NO_DATA_MESSAGE.to_string());
                self.set_warning(NO_DATA_MESSAGE);
            }
            Some(Err(e @ PipelineError::FetchFailed { message, .. })) => {
                self.push_error(ErrorCategory::Fetch, e, fetch_error_message(message));
            }
            None => match request.mode {
                ResolveMode::ByName if !request.query.trim().is_empty() => {
                    self.set_warning(format!("No companies match \"{}\"", request.query.trim()))
                }
                _ if request.query.trim().is_empty() => {
                    self.set_warning(format!("Enter a {}", self.sidebar.input_title().to_lowercase()))
                }
                _ => self.set_warning(format!("\"{}\" is not a valid symbol", request.query.trim())),
            },
        }

        self.outcome = Some(outcome);
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.outcome.as_ref().and_then(Outcome::dashboard)
    }

    pub fn pipeline_error(&self) -> Option<&PipelineError> {
        self.outcome.as_ref().and_then(Outcome::error)
    }

    pub fn candidates(&self) -> &[Candidate] {
        self.outcome
            .as_ref()
            .map(|o| o.candidates.as_slice())
            .unwrap_or(&[])
    }

    // ── Input actions ────────────────────────────────────────────────

    pub fn begin_edit(&mut self) {
        self.sidebar.editing = Some(self.sidebar.query().to_string());
    }

    pub fn cancel_edit(&mut self) {
        self.sidebar.editing = None;
    }

    pub fn submit_edit(&mut self) {
        if let Some(text) = self.sidebar.editing.take() {
            self.sidebar.set_query(text.trim().to_string());
            self.request_refresh();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.sidebar.mode = self.sidebar.mode.toggle();
        self.sidebar.cursor = 0;
        self.sidebar.picked = 0;
        self.request_refresh();
    }

    pub fn move_cursor(&mut self, down: bool) {
        let count = self.candidates().len();
        if down {
            if self.sidebar.cursor + 1 < count {
                self.sidebar.cursor += 1;
            }
        } else {
            self.sidebar.cursor = self.sidebar.cursor.saturating_sub(1);
        }
    }

    pub fn pick_candidate(&mut self) {
        if self.sidebar.mode == ResolveMode::ByName && !self.candidates().is_empty() {
            self.sidebar.picked = self.sidebar.cursor;
            self.request_refresh();
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.request_refresh();
    }

    // ── Status and errors ────────────────────────────────────────────

    /// Push an error to the history, capping at 50, and show it.
    pub fn push_error(&mut self, category: ErrorCategory, source: &PipelineError, message: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            symbol: source.symbol().to_string(),
            message: message.clone(),
            context: source.to_string(),
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tickerdash_core::data::SyntheticProvider;
    use tickerdash_core::domain::ResolvedSymbol;

    pub(crate) fn test_app(mode: ResolveMode) -> AppState {
        let provider = SyntheticProvider::new(42)
            .with_end_date(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
        let mut config = AppConfig::default();
        config.defaults.mode = mode;
        AppState::new(Box::new(provider), &config)
    }

    #[test]
    fn tab_cycle() {
        assert_eq!(Tab::PriceVolume.next(), Tab::MovingAverages);
        assert_eq!(Tab::Indicators.next(), Tab::PriceVolume);
        assert_eq!(Tab::PriceVolume.prev(), Tab::Indicators);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(Tab::from_index(i), Some(*tab));
        }
        assert!(Tab::from_index(3).is_none());
    }

    #[test]
    fn starts_with_pending_refresh_of_default_symbol() {
        let mut app = test_app(ResolveMode::BySymbol);
        assert!(app.pending_refresh);
        assert_eq!(app.request().query, "AAPL");

        app.refresh();
        assert!(!app.pending_refresh);
        assert_eq!(app.dashboard().unwrap().symbol.as_str(), "AAPL");
        assert!(matches!(app.status_message, Some((_, StatusLevel::Info))));
    }

    #[test]
    fn unknown_symbol_shows_no_data_warning() {
        let mut app = test_app(ResolveMode::BySymbol);
        app.begin_edit();
        app.sidebar.editing = Some("zzzz".into());
        app.submit_edit();
        assert!(app.pending_refresh);
        app.refresh();

        assert!(app.dashboard().is_none());
        assert!(matches!(
            app.pipeline_error(),
            Some(PipelineError::NoDataFound { symbol }) if *symbol == ResolvedSymbol::parse("ZZZZ").unwrap()
        ));
        assert_eq!(
            app.status_message,
            Some((NO_DATA_MESSAGE.to_string(), StatusLevel::Warning))
        );
        assert_eq!(app.error_history[0].category, ErrorCategory::NoData);
        assert_eq!(app.error_history[0].symbol, "ZZZZ");
    }

    #[test]
    fn name_mode_pick_switches_symbol() {
        let mut app = test_app(ResolveMode::ByName);
        app.refresh();
        assert!(app.candidates().len() >= 2);
        let first = app.dashboard().unwrap().symbol.clone();

        app.move_cursor(true);
        app.pick_candidate();
        assert!(app.pending_refresh);
        app.refresh();

        let second = app.dashboard().unwrap().symbol.clone();
        assert_ne!(first, second);
        assert_eq!(second, app.candidates()[1].symbol);
    }

    #[test]
    fn cursor_stays_within_candidates() {
        let mut app = test_app(ResolveMode::ByName);
        app.refresh();
        for _ in 0..100 {
            app.move_cursor(true);
        }
        assert_eq!(app.sidebar.cursor, app.candidates().len() - 1);
        for _ in 0..100 {
            app.move_cursor(false);
        }
        assert_eq!(app.sidebar.cursor, 0);
    }

    #[test]
    fn toggle_mode_and_tab_request_refresh() {
        let mut app = test_app(ResolveMode::BySymbol);
        app.refresh();

        app.toggle_mode();
        assert_eq!(app.sidebar.mode, ResolveMode::ByName);
        assert_eq!(app.request().query, "Apple");
        assert!(app.pending_refresh);
        app.refresh();

        app.select_tab(Tab::Indicators);
        assert!(app.pending_refresh);
        assert_eq!(app.active_tab, Tab::Indicators);
    }

    #[test]
    fn name_without_matches_warns() {
        let mut app = test_app(ResolveMode::ByName);
        app.begin_edit();
        app.sidebar.editing = Some("no such company".into());
        app.submit_edit();
        app.refresh();
        assert!(app.outcome.as_ref().unwrap().report.is_none());
        assert!(matches!(app.status_message, Some((ref m, StatusLevel::Warning)) if m.contains("no such company")));
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = test_app(ResolveMode::BySymbol);
        let err = PipelineError::FetchFailed {
            symbol: ResolvedSymbol::parse("AAPL").unwrap(),
            message: "timeout".into(),
        };
        for i in 0..60 {
            app.push_error(ErrorCategory::Fetch, &err, format!("error {i}"));
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }
}
