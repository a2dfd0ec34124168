use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Universal parameters for requesting daily bars from a market data provider.
///
/// Vendor-agnostic: any provider exposing daily bars by symbol and date range
/// can serve this query. The range is inclusive on both ends from the caller's
/// point of view; providers translate it into whatever convention their API
/// uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarsQuery {
    /// Ticker symbol recognized by the provider (e.g. `"AAPL"`, `"BTC-USD"`).
    pub symbol: String,

    /// First calendar date of the requested range.
    pub start: NaiveDate,

    /// Last calendar date of the requested range.
    pub end: NaiveDate,
}

impl BarsQuery {
    /// Convenience constructor.
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }
}
