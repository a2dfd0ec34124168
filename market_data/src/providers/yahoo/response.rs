//! Wire format of the chart endpoint and its collapse into canonical bars.
//!
//! The payload is column-oriented: one `timestamp` axis plus parallel
//! `open/high/low/close/volume` arrays nested under `indicators.quote`. The
//! `quote` field is an array because the endpoint shape anticipates batch
//! requests; a single-symbol call still wraps its columns in a one-element
//! list, and [`collapse_bars`] flattens that first element into row-wise
//! [`Bar`]s keyed by an explicit date.

use chrono::DateTime;
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Error object the endpoint embeds in the envelope (unknown symbol, bad
/// range, throttling).
#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    /// Unix seconds, one entry per row. Absent when the range holds no data.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

/// The parallel column arrays. Individual entries are `null` on rows the
/// exchange did not trade, so every cell is optional.
#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// Collapses a column-oriented chart result into row-wise bars.
///
/// Takes the first `quote` column set (the only one present for a
/// single-symbol request), zips it with the timestamp axis, and drops any row
/// with a missing cell. Row order follows the timestamp axis, which the
/// endpoint delivers ascending.
pub fn collapse_bars(result: ChartResult) -> Vec<Bar> {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (row, seconds) in result.timestamp.iter().enumerate() {
        let Some(date) = DateTime::from_timestamp(*seconds, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            cell(&quote.open, row),
            cell(&quote.high, row),
            cell(&quote.low, row),
            cell(&quote.close, row),
            cell(&quote.volume, row),
        ) else {
            continue;
        };

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }
    bars
}

fn cell<T: Copy>(column: &[Option<T>], row: usize) -> Option<T> {
    column.get(row).copied().flatten()
}

#[cfg(test)]
mod tests {
    use crate::models::time_series::TimeSeries;

    use super::*;

    // Two trading days around a null-padded holiday row, as the endpoint
    // actually shapes them for a single-symbol request.
    const NESTED_PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "AAPL"},
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{
                        "open":   [185.0, null, 184.2],
                        "high":   [186.4, null, 185.9],
                        "low":    [183.9, null, 183.5],
                        "close":  [185.6, null, 184.8],
                        "volume": [52000000, null, 48100000]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    fn parse_result() -> ChartResult {
        let envelope: ChartEnvelope = serde_json::from_str(NESTED_PAYLOAD).unwrap();
        envelope.chart.result.unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn collapse_zips_columns_into_dated_rows() {
        let bars = collapse_bars(parse_result());

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date.to_string(), "2024-01-02");
        assert_eq!(bars[0].open, 185.0);
        assert_eq!(bars[0].close, 185.6);
        assert_eq!(bars[0].volume, 52_000_000);
        assert_eq!(bars[1].date.to_string(), "2024-01-04");
    }

    #[test]
    fn null_padded_rows_are_dropped() {
        let bars = collapse_bars(parse_result());
        assert!(bars.iter().all(|b| b.date.to_string() != "2024-01-03"));
    }

    #[test]
    fn collapse_preserves_ascending_order() {
        let bars = collapse_bars(parse_result());
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn collapsing_nested_and_renormalizing_flat_agree() {
        // Normalizing the collapsed nested payload and normalizing the same
        // rows handed over flat must yield the identical canonical series.
        let from_nested = TimeSeries::new("AAPL", collapse_bars(parse_result()));
        let flat_rows = from_nested.bars.clone();
        let from_flat = TimeSeries::new("AAPL", flat_rows);

        assert_eq!(from_nested, from_flat);
    }

    #[test]
    fn missing_timestamp_axis_yields_no_bars() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "GONE"},
                    "indicators": {"quote": [{}]}
                }],
                "error": null
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(payload).unwrap();
        let result = envelope.chart.result.unwrap().into_iter().next().unwrap();
        assert!(collapse_bars(result).is_empty());
    }

    #[test]
    fn embedded_error_object_parses() {
        let payload = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(payload).unwrap();
        let error = envelope.chart.error.unwrap();
        assert_eq!(error.code, "Not Found");
        assert!(!error.description.is_empty());
    }
}
