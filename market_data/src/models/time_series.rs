//! An ordered collection of daily bars for a single symbol.

use crate::models::bar::Bar;

/// A complete set of daily bars for one symbol.
///
/// Construction through [`TimeSeries::new`] establishes the two invariants
/// every consumer relies on: bars are sorted ascending by date and no two
/// bars share a date. A series with zero bars is a valid result (delisted
/// ticker, future range, holiday-only range) and is distinct from a failed
/// load.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// The symbol this data represents (e.g., "AAPL", "BTC-USD").
    pub symbol: String,
    /// The bars, ascending by date, deduplicated.
    pub bars: Vec<Bar>,
}

impl TimeSeries {
    /// Builds a normalized series: stable-sorts by date, then drops any bar
    /// whose date duplicates the one before it (first occurrence wins).
    pub fn new(symbol: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in series order.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }
}
