//! Front door of the retrieval pipeline.
//!
//! [`Loader`] wraps any [`DataProvider`] and owns the contract the rest of
//! the system relies on: every outcome is either a normalized, possibly
//! empty [`TimeSeries`] or a typed [`Error`]. A provider fault never
//! escapes as a panic or a raw transport error.

use log::debug;

use crate::errors::Error;
use crate::models::{query::BarsQuery, time_series::TimeSeries};
use crate::providers::DataProvider;

/// Loads daily bars through a boxed provider.
pub struct Loader {
    provider: Box<dyn DataProvider + Send + Sync>,
}

impl Loader {
    /// Wraps a concrete provider.
    pub fn new(provider: Box<dyn DataProvider + Send + Sync>) -> Self {
        Self { provider }
    }

    /// Fetches and normalizes daily bars for the query.
    ///
    /// An inverted range (`start > end`) short-circuits to an empty series
    /// rather than an error. Provider failures surface as
    /// [`Error::Provider`] carrying the diagnostic message.
    pub async fn load(&self, query: &BarsQuery) -> Result<TimeSeries, Error> {
        if query.start > query.end {
            debug!(
                "inverted range {}..{} for {}, returning empty series",
                query.start, query.end, query.symbol
            );
            return Ok(TimeSeries::new(&query.symbol, Vec::new()));
        }

        let series = self.provider.fetch_daily_bars(query).await?;
        // Re-establish ordering invariants regardless of provider behavior.
        Ok(TimeSeries::new(series.symbol, series.bars))
    }
}
