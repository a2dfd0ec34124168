//! Tabular CSV export of a bar series and its moving-average column.
//!
//! The layout matches what the dashboard's download button serves: a
//! `Date,Open,High,Low,Close,Volume,MA<window>` header, one row per bar in
//! series order, ISO dates, and empty `MA` cells on warm-up rows where the
//! average has no defined value.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use snafu::ResultExt;

use crate::io::sink::{ConversionSnafu, DataSink, IoSnafu, SinkError, WriteSnafu};
use crate::models::time_series::TimeSeries;

/// File name the export is served under.
pub fn export_file_name(symbol: &str) -> String {
    format!("{symbol}_data.csv")
}

/// Serializes the series plus its moving-average column as CSV.
pub fn write_csv<W: Write>(
    writer: W,
    series: &TimeSeries,
    averages: &[Option<f64>],
    window: usize,
) -> Result<(), SinkError> {
    if averages.len() != series.bars.len() {
        return ConversionSnafu {
            message: format!(
                "moving-average column has {} values for {} bars",
                averages.len(),
                series.bars.len()
            ),
        }
        .fail();
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    let ma_header = format!("MA{window}");
    csv_writer
        .write_record([
            "Date",
            "Open",
            "High",
            "Low",
            "Close",
            "Volume",
            ma_header.as_str(),
        ])
        .map_err(|e| WriteSnafu { message: e.to_string() }.build())?;

    for (bar, average) in series.bars.iter().zip(averages) {
        let ma_cell = average.map(|v| v.to_string()).unwrap_or_default();
        csv_writer
            .write_record([
                bar.date.format("%Y-%m-%d").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
                ma_cell,
            ])
            .map_err(|e| WriteSnafu { message: e.to_string() }.build())?;
    }

    csv_writer.flush().context(IoSnafu)
}

/// Writes the export as `<symbol>_data.csv` under a target directory.
pub struct CsvFileSink {
    dir: PathBuf,
}

impl CsvFileSink {
    /// A sink writing into `dir`, created on first write if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DataSink for CsvFileSink {
    type Output = PathBuf;

    async fn write(
        &self,
        series: &TimeSeries,
        averages: &[Option<f64>],
        window: usize,
    ) -> Result<PathBuf, SinkError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).context(IoSnafu)?;
        }

        let path = self.dir.join(export_file_name(&series.symbol));
        let file = File::create(&path).context(IoSnafu)?;
        write_csv(file, series, averages, window)?;

        Ok(path)
    }
}
