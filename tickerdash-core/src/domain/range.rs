//! History window requested from the market-data provider.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Lookback window for daily history. Serialized with Yahoo's range codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryRange {
    pub const ALL: [HistoryRange; 6] = [
        HistoryRange::OneMonth,
        HistoryRange::ThreeMonths,
        HistoryRange::SixMonths,
        HistoryRange::OneYear,
        HistoryRange::TwoYears,
        HistoryRange::FiveYears,
    ];

    /// Range code understood by the Yahoo chart API.
    pub fn code(self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
        }
    }

    /// Calendar days covered by the window.
    pub fn calendar_days(self) -> i64 {
        match self {
            HistoryRange::OneMonth => 30,
            HistoryRange::ThreeMonths => 91,
            HistoryRange::SixMonths => 182,
            HistoryRange::OneYear => 365,
            HistoryRange::TwoYears => 730,
            HistoryRange::FiveYears => 1826,
        }
    }

    /// Weekdays in the window ending at `end` (inclusive), oldest first.
    pub fn weekdays_until(self, end: NaiveDate) -> Vec<NaiveDate> {
        let start = end - Duration::days(self.calendar_days() - 1);
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .collect()
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HistoryRange::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = HistoryRange::ALL.iter().map(|r| r.code()).collect();
                format!("unknown range '{s}' (expected one of {})", valid.join(", "))
            })
    }
}
