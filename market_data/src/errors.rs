use thiserror::Error;

use crate::io::sink::SinkError;
use crate::providers::ProviderError;

/// The unified error type for the `market_data` crate.
///
/// Layer-specific errors ([`ProviderError`], [`SinkError`]) are flattened
/// into string-carrying variants at the crate boundary. An empty result is
/// never an error; see [`TimeSeries`](crate::models::time_series::TimeSeries).
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from a data provider (e.g., API error, validation).
    #[error("Provider error: {0}")]
    Provider(String),

    /// An error originating from a data sink (e.g., file I/O, serialization).
    #[error("Sink error: {0}")]
    Sink(String),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl From<ProviderError> for Error {
    fn from(error: ProviderError) -> Self {
        Error::Provider(error.to_string())
    }
}

impl From<SinkError> for Error {
    fn from(error: SinkError) -> Self {
        Error::Sink(error.to_string())
    }
}
