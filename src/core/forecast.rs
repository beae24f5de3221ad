//! Forecast result structures.

use crate::core::Series;
use chrono::{DateTime, Utc};

/// Which of the two models produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Structural trend + seasonality decomposition.
    Seasonal,
    /// Fixed-order integrated autoregressive moving-average model.
    Autoregressive,
}

impl ModelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Seasonal => "seasonal",
            ModelKind::Autoregressive => "autoregressive",
        }
    }
}

/// Timestamped point predictions, suitable for direct plotting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl Forecast {
    /// Create a forecast from parallel timestamp and value vectors.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self { timestamps, values }
    }

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

    /// Iterate over (ds, y_hat) pairs.
    pub fn points(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }
}

/// One model's completed run: the history it was fit on and its predictions.
///
/// Two of these coexist per pipeline run with independent lifecycles; a
/// failure in one slot never invalidates the other.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForecast {
    pub kind: ModelKind,
    /// Number of future periods requested beyond the last observation.
    pub horizon: usize,
    /// The observations the model was fit on (windowed for the
    /// autoregressive model).
    pub history: Series,
    /// Predictions; the seasonal model covers the in-sample range plus the
    /// horizon, the autoregressive model the horizon only.
    pub predicted: Forecast,
}

impl ModelForecast {
    /// The final `horizon` predicted points, the extrapolated future.
    pub fn future(&self) -> Forecast {
        let start = self.predicted.len().saturating_sub(self.horizon);
        Forecast::new(
            self.predicted.timestamps()[start..].to_vec(),
            self.predicted.values()[start..].to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::days(i as i64)).collect()
    }

    #[test]
    fn forecast_exposes_plot_ready_pairs() {
        let timestamps = make_timestamps(3);
        let forecast = Forecast::new(timestamps.clone(), vec![1.0, 2.0, 3.0]);

        assert_eq!(forecast.len(), 3);
        let points: Vec<_> = forecast.points().collect();
        assert_eq!(points[1], (timestamps[1], 2.0));
    }

    #[test]
    fn empty_forecast() {
        let forecast = Forecast::default();
        assert!(forecast.is_empty());
        assert_eq!(forecast.points().count(), 0);
    }

    #[test]
    fn model_forecast_future_slices_the_horizon_tail() {
        let timestamps = make_timestamps(5);
        let history = Series::new(timestamps[..3].to_vec(), vec![1.0, 2.0, 3.0]).unwrap();
        let predicted = Forecast::new(timestamps.clone(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let result = ModelForecast {
            kind: ModelKind::Seasonal,
            horizon: 2,
            history,
            predicted,
        };

        let future = result.future();
        assert_eq!(future.len(), 2);
        assert_eq!(future.values(), &[4.0, 5.0]);
        assert_eq!(future.timestamps(), &timestamps[3..]);
    }

    #[test]
    fn model_kind_names() {
        assert_eq!(ModelKind::Seasonal.name(), "seasonal");
        assert_eq!(ModelKind::Autoregressive.name(), "autoregressive");
    }
}
