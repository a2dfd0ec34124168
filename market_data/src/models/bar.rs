//! Canonical in-memory representation of a daily trading bar (OHLCV).
//!
//! This struct is the standard output row for all
//! [`DataProvider`](crate::providers::DataProvider) implementations,
//! regardless of asset class (stocks, crypto, etc.).

use chrono::NaiveDate;

/// A single daily OHLCV bar.
///
/// The date axis is explicit rather than positional, so a series of bars is
/// self-describing. Provider invariants (`high >= max(open, close)`,
/// `low <= min(open, close)`) are trusted as delivered, never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The trading day this bar covers.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the trading day.
    pub high: f64,

    /// Lowest price during the trading day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares or units traded during the day.
    pub volume: u64,
}
