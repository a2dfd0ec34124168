use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::time_series::TimeSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while trying to write the data (e.g., file I/O error).
    #[snafu(display("Failed to write data: {message}"))]
    WriteError {
        message: String,
        backtrace: Backtrace,
    },

    /// The series and its derived column could not be combined into the
    /// destination format (e.g. mismatched lengths).
    #[snafu(display("Data conversion error: {message}"))]
    ConversionError {
        message: String,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// This makes the trait flexible. For example:
    /// - A file sink might return `PathBuf`, the path to the created file.
    /// - A database sink might return `usize`, the number of rows inserted.
    type Output;

    /// Writes a series together with its moving-average column.
    ///
    /// # Arguments
    /// * `series` - The bars to export.
    /// * `averages` - The moving-average column, aligned 1:1 with the bars;
    ///   `None` marks warm-up rows with no defined value.
    /// * `window` - The window size the column was computed with (labels the
    ///   output, e.g. a `MA50` header).
    async fn write(
        &self,
        series: &TimeSeries,
        averages: &[Option<f64>],
        window: usize,
    ) -> Result<Self::Output, SinkError>;
}
