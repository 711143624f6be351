//! Yahoo Finance collaborator.
//!
//! Daily history comes from the v8 chart API, company-name lookup from the
//! v1 search API. Yahoo has no official API and is subject to unannounced
//! format changes; parsing is kept separate from transport so the decoding
//! rules can be tested against canned payloads.
//!
//! One request per call. No retry, no backoff, no caching.

use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use super::provider::{DataError, MarketDataProvider, SearchProvider, SearchRecord};
use crate::config::ProviderConfig;
use crate::domain::{bar, Bar, HistoryRange, ResolvedSymbol};

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteColumns {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<serde_json::Value>,
}

/// Yahoo Finance chart + search client (blocking).
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    chart_url: String,
    search_url: String,
    search_limit: usize,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DataError::Setup(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            chart_url: config.chart_url.trim_end_matches('/').to_string(),
            search_url: config.search_url.clone(),
            search_limit: config.search_limit,
        })
    }

    fn get(&self, request: reqwest::blocking::RequestBuilder) -> Result<(u16, String), DataError> {
        let resp = request
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        Ok((status, body))
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_history(
        &self,
        symbol: &ResolvedSymbol,
        range: HistoryRange,
    ) -> Result<Vec<Bar>, DataError> {
        let url = format!("{}/{}", self.chart_url, symbol);
        debug!(%symbol, range = range.code(), "requesting chart");

        let request = self
            .client
            .get(&url)
            .query(&[("range", range.code()), ("interval", "1d")]);
        let (status, body) = self.get(request)?;

        // Yahoo answers unknown symbols with 404 and a chart error payload.
        if status == 404 {
            if let Ok(chart) = serde_json::from_str::<ChartResponse>(&body) {
                if is_not_found(&chart) {
                    debug!(%symbol, "chart reports symbol not found");
                    return Ok(Vec::new());
                }
            }
        }
        if !(200..300).contains(&status) {
            return Err(DataError::Http {
                provider: MarketDataProvider::name(self).to_string(),
                status,
            });
        }

        let bars = parse_chart(&body)?;
        debug!(%symbol, bars = bars.len(), "chart decoded");
        Ok(bars)
    }
}

impl SearchProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_search"
    }

    fn search(&self, query: &str) -> Result<Vec<SearchRecord>, DataError> {
        let limit = self.search_limit.to_string();
        debug!(query, "requesting search");

        let request = self.client.get(&self.search_url).query(&[
            ("q", query),
            ("quotesCount", limit.as_str()),
            ("newsCount", "0"),
        ]);
        let (status, body) = self.get(request)?;
        if !(200..300).contains(&status) {
            return Err(DataError::Http {
                provider: SearchProvider::name(self).to_string(),
                status,
            });
        }

        parse_search(&body)
    }
}

fn is_not_found(chart: &ChartResponse) -> bool {
    chart
        .chart
        .error
        .as_ref()
        .is_some_and(|e| e.code.eq_ignore_ascii_case("Not Found"))
}

/// Decode a chart payload into normalized bars.
///
/// Rows with any missing OHLC value are skipped (holidays, halted sessions);
/// a missing volume becomes 0. A "Not Found" chart error decodes to no bars.
fn parse_chart(body: &str) -> Result<Vec<Bar>, DataError> {
    let chart: ChartResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("chart payload: {e}")))?;

    if is_not_found(&chart) {
        return Ok(Vec::new());
    }

    let ChartResult { result, error } = chart.chart;
    let data = match (result, error) {
        (Some(results), _) => match results.into_iter().next() {
            Some(data) => data,
            None => return Ok(Vec::new()),
        },
        (None, Some(err)) => {
            return Err(DataError::ResponseFormatChanged(format!(
                "{}: {}",
                err.code, err.description
            )))
        }
        (None, None) => {
            return Err(DataError::ResponseFormatChanged(
                "empty result with no error".into(),
            ))
        }
    };

    // Listed but never traded in the window: no timestamps at all.
    let Some(timestamps) = data.timestamp else {
        return Ok(Vec::new());
    };
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let column = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;

        let (Some(open), Some(high), Some(low), Some(close)) = (
            column(&quote.open, i),
            column(&quote.high, i),
            column(&quote.low, i),
            column(&quote.close, i),
        ) else {
            continue;
        };

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    Ok(bar::normalize(bars))
}

/// Decode a search payload. Records keep whatever fields were present;
/// completeness is the resolver's concern.
fn parse_search(body: &str) -> Result<Vec<SearchRecord>, DataError> {
    let resp: SearchResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("search payload: {e}")))?;

    let text = |quote: &serde_json::Value, key: &str| {
        quote
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    };

    Ok(resp
        .quotes
        .iter()
        .map(|quote| SearchRecord {
            name: text(quote, "shortname").or_else(|| text(quote, "longname")),
            symbol: text(quote, "symbol"),
        })
        .collect())
}
