//! Latest-bar summary metrics.

use market_data::models::time_series::TimeSeries;
use serde::Serialize;

/// The headline metrics row: last close, last bar's range and volume, and
/// the change against the previous close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySnapshot {
    /// Closing price of the most recent bar.
    pub current_price: f64,
    /// High of the most recent bar.
    pub day_high: f64,
    /// Low of the most recent bar.
    pub day_low: f64,
    /// Volume of the most recent bar.
    pub day_volume: u64,
    /// Absolute change versus the previous close.
    pub change_abs: f64,
    /// Percent change versus the previous close.
    pub change_pct: f64,
}

/// Computes the snapshot from the final two bars.
///
/// A series with fewer than two bars has no previous close to compare
/// against and yields `None`; callers render an explicit "not enough data"
/// state instead of a fabricated change.
pub fn summarize(series: &TimeSeries) -> Option<SummarySnapshot> {
    let [.., previous, last] = series.bars.as_slice() else {
        return None;
    };

    let change_abs = last.close - previous.close;
    Some(SummarySnapshot {
        current_price: last.close,
        day_high: last.high,
        day_low: last.low,
        day_volume: last.volume,
        change_abs,
        change_pct: change_abs / previous.close * 100.0,
    })
}
