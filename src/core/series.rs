//! Canonical (ds, y) time series.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};

/// A univariate time series: timestamp `ds`, numeric value `y`.
///
/// Rows keep the order they were constructed in. Timestamps are NOT
/// required to be sorted, evenly spaced, or unique; models own whatever
/// ordering discipline they need. Values are never missing: rows with a
/// null side are dropped by the series builder before this type exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl Series {
    /// Create a series from parallel timestamp and value vectors.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        Ok(Self { timestamps, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (ds, y) pairs.
    pub fn points(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }

    /// The last `window` observations in the series' existing order.
    ///
    /// Returns the whole series when it is shorter than the window.
    pub fn tail(&self, window: usize) -> Series {
        let start = self.len().saturating_sub(window);
        Series {
            timestamps: self.timestamps[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Infer the series' cadence as the median spacing between consecutive
    /// timestamps, in the series' existing order.
    ///
    /// Duplicate timestamps contribute zero-length spacings; a series
    /// dominated by duplicates can therefore infer a zero cadence.
    pub fn infer_cadence(&self) -> Result<Duration> {
        if self.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: self.len(),
            });
        }

        let mut diffs: Vec<i64> = self
            .timestamps
            .windows(2)
            .map(|w| (w[1] - w[0]).num_seconds())
            .collect();
        diffs.sort_unstable();

        Ok(Duration::seconds(diffs[diffs.len() / 2]))
    }

    /// Timestamps for `horizon` future periods following the last
    /// observation, spaced at the inferred cadence.
    pub fn future_timestamps(&self, horizon: usize) -> Result<Vec<DateTime<Utc>>> {
        let cadence = self.infer_cadence()?;
        let last = *self
            .timestamps
            .last()
            .ok_or(ForecastError::EmptyData)?;
        Ok((1..=horizon as i32).map(|i| last + cadence * i).collect())
    }
}
