use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::query::BarsQuery;
use crate::providers::{ProviderError, ValidationSnafu};

/// Bar interval supported by the chart endpoint.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum Interval {
    /// One bar per trading day.
    #[default]
    OneDay,
    /// One bar per week.
    OneWeek,
    /// One bar per month.
    OneMonth,
}

impl Interval {
    /// The wire token the chart endpoint expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::OneDay => "1d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
        }
    }
}

/// Rejects queries the endpoint cannot answer meaningfully.
pub fn validate_query(query: &BarsQuery) -> Result<(), ProviderError> {
    if query.symbol.trim().is_empty() {
        return ValidationSnafu {
            message: "symbol must not be empty",
        }
        .fail();
    }
    Ok(())
}

/// Builds the query string for a chart request.
///
/// The endpoint treats `period2` as an exclusive midnight-UTC boundary, so the
/// caller-facing inclusive `end` date is pushed forward one day.
pub fn construct_params(query: &BarsQuery, interval: Interval) -> Vec<(String, String)> {
    let period2 = query.end.succ_opt().unwrap_or(query.end);
    vec![
        ("period1".to_string(), epoch_seconds(query.start).to_string()),
        ("period2".to_string(), epoch_seconds(period2).to_string()),
        ("interval".to_string(), interval.as_str().to_string()),
        ("events".to_string(), "history".to_string()),
        ("includeAdjustedClose".to_string(), "false".to_string()),
    ]
}

fn epoch_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
