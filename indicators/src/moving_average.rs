//! Trailing simple moving average over closing prices.

use std::num::NonZeroUsize;

use market_data::models::time_series::TimeSeries;

/// The moving-average column for a bar series, aligned 1:1 with its bars.
///
/// The first `window - 1` positions are `None`: the average is undefined
/// until a full window of closes exists, and renderers are expected to gap
/// those rows rather than draw a substitute value.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageSeries {
    window: NonZeroUsize,
    values: Vec<Option<f64>>,
}

impl MovingAverageSeries {
    /// The window size the column was computed with.
    pub fn window(&self) -> NonZeroUsize {
        self.window
    }

    /// The values, one per bar in series order.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of values (equal to the number of bars derived from).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the column, yielding the raw values.
    pub fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }
}

/// Computes the trailing mean of `close` over `window` bars ending at each
/// position, in a single pass with a running window sum.
///
/// `window = 1` degenerates to the close series itself; a window longer than
/// the series yields all-`None`.
pub fn moving_average(series: &TimeSeries, window: NonZeroUsize) -> MovingAverageSeries {
    let width = window.get();
    let closes: Vec<f64> = series.closes().collect();

    let mut values = Vec::with_capacity(closes.len());
    let mut sum = 0.0;
    for (i, close) in closes.iter().enumerate() {
        sum += close;
        if i >= width {
            sum -= closes[i - width];
        }
        if i + 1 >= width {
            values.push(Some(sum / width as f64));
        } else {
            values.push(None);
        }
    }

    MovingAverageSeries { window, values }
}
