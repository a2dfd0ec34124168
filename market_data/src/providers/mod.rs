//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching daily bar data from any market data vendor. Each concrete
//! implementation (such as the Yahoo chart-API provider in [`yahoo`]) handles
//! vendor-specific wire formats and validation behind it.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data::models::{query::BarsQuery, time_series::TimeSeries};
//! use market_data::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_daily_bars(
//!         &self,
//!         query: &BarsQuery,
//!     ) -> Result<TimeSeries, ProviderError> {
//!         Ok(TimeSeries::new(&query.symbol, Vec::new()))
//!     }
//! }
//! ```

pub mod yahoo;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{query::BarsQuery, time_series::TimeSeries};

/// Trait for fetching daily bar data from a market data provider.
///
/// Implement this trait for each concrete data vendor. A provider returns a
/// normalized [`TimeSeries`]; an empty series is a valid answer for a range
/// with no trading data and must not be reported as an error.
#[async_trait]
pub trait DataProvider {
    /// Fetches daily bars for the given query.
    ///
    /// # Returns
    ///
    /// * `Ok(TimeSeries)` - The normalized bars, possibly empty.
    /// * `Err(ProviderError)` - If the request fails or the query is invalid
    ///   for this provider.
    async fn fetch_daily_bars(&self, query: &BarsQuery) -> Result<TimeSeries, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The configured user agent contains invalid header characters.
    #[snafu(display("Invalid user agent: {source}"))]
    InvalidUserAgent {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., unknown
    /// symbol).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The query was invalid for this specific provider.
    #[snafu(display("Invalid query for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },
}
