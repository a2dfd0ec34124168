//! Derived metrics over a daily bar series: a trailing simple moving average
//! and a latest-bar summary snapshot.
//!
//! Both derivations are pure, synchronous, single-pass computations over an
//! already-materialized [`TimeSeries`]; the input is never mutated.

#![deny(missing_docs)]

pub mod moving_average;
pub mod snapshot;

use std::num::NonZeroUsize;

use market_data::models::time_series::TimeSeries;

use crate::moving_average::{MovingAverageSeries, moving_average};
use crate::snapshot::{SummarySnapshot, summarize};

/// Computes everything the dashboard displays for one series: the
/// moving-average column and, when at least two bars exist, the summary
/// snapshot (`None` otherwise).
pub fn derive(
    series: &TimeSeries,
    window: NonZeroUsize,
) -> (MovingAverageSeries, Option<SummarySnapshot>) {
    (moving_average(series, window), summarize(series))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use market_data::models::bar::Bar;

    use super::*;

    fn series(closes: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
            })
            .collect();
        TimeSeries::new("TEST", bars)
    }

    #[test]
    fn derive_combines_average_and_snapshot() {
        let series = series(&[100.0, 110.0, 120.0]);
        let window = NonZeroUsize::new(2).unwrap();

        let (averages, snapshot) = derive(&series, window);

        assert_eq!(averages.len(), 3);
        assert!(snapshot.is_some());
    }

    #[test]
    fn derive_on_single_bar_has_no_snapshot_but_full_length_column() {
        let series = series(&[100.0]);
        let window = NonZeroUsize::new(5).unwrap();

        let (averages, snapshot) = derive(&series, window);

        assert_eq!(averages.len(), 1);
        assert_eq!(averages.values(), &[None]);
        assert!(snapshot.is_none());
    }

    #[test]
    fn derive_on_empty_series_is_empty_and_unavailable() {
        let series = series(&[]);
        let window = NonZeroUsize::new(5).unwrap();

        let (averages, snapshot) = derive(&series, window);

        assert_eq!(averages.len(), 0);
        assert!(snapshot.is_none());
    }
}
