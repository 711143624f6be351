//! One refresh cycle: resolve, select, run the pipeline.
//!
//! The caller builds a fresh `DashboardRequest` from its current inputs on
//! every interaction; nothing carries over between cycles.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::IndicatorConfig;
use crate::data::MarketDataProvider;
use crate::domain::{HistoryRange, ResolvedSymbol};
use crate::pipeline::{self, Dashboard, PipelineError};
use crate::resolver::{self, Candidate, ResolveMode, Resolver};

/// Inputs for one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub mode: ResolveMode,
    pub query: String,
    /// Index into the candidate list.
    pub selection: usize,
    pub range: HistoryRange,
}

impl DashboardRequest {
    pub fn new(mode: ResolveMode, query: impl Into<String>) -> Self {
        Self {
            mode,
            query: query.into(),
            selection: 0,
            range: HistoryRange::default(),
        }
    }

    pub fn with_selection(mut self, selection: usize) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_range(mut self, range: HistoryRange) -> Self {
        self.range = range;
        self
    }
}

/// Everything one refresh produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub request: DashboardRequest,
    pub candidates: Vec<Candidate>,
    pub resolved: Option<ResolvedSymbol>,
    /// `None` when there was nothing to fetch.
    pub report: Option<Result<Dashboard, PipelineError>>,
}

impl Outcome {
    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.report.as_ref().and_then(|r| r.as_ref().ok())
    }

    pub fn error(&self) -> Option<&PipelineError> {
        self.report.as_ref().and_then(|r| r.as_ref().err())
    }
}

pub fn refresh(
    resolver: &Resolver<'_>,
    market: &dyn MarketDataProvider,
    request: &DashboardRequest,
    indicators: &IndicatorConfig,
) -> Outcome {
    let candidates = resolver.resolve(&request.query, request.mode);
    let resolved = resolver::select(&candidates, request.selection).map(|c| c.symbol.clone());

    let report = resolved.as_ref().map(|symbol| {
        let result = pipeline::run(market, symbol, request.range, indicators);
        match &result {
            Ok(dash) => info!(
                %symbol,
                range = request.range.code(),
                bars = dash.bars.len(),
                "dashboard refreshed"
            ),
            Err(e) => warn!(%symbol, error = %e, "dashboard refresh failed"),
        }
        result
    });

    Outcome {
        request: request.clone(),
        candidates,
        resolved,
        report,
    }
}
