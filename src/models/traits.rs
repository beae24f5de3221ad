//! Common forecasting interface.

use crate::core::{Forecast, Series};
use crate::error::Result;

/// A model that fits a series and extrapolates future values.
///
/// Models are independent: each run owns its history and its failure mode,
/// so the orchestrator can run several side by side and report per-model
/// outcomes.
pub trait Forecaster {
    /// Fit the model to the observed series.
    fn fit(&mut self, series: &Series) -> Result<()>;

    /// Produce predictions for `horizon` future periods.
    ///
    /// Returns [`ForecastError::FitRequired`](crate::ForecastError::FitRequired)
    /// when called before a successful `fit`.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Human-readable model name for diagnostics.
    fn name(&self) -> &str;

    /// Whether the model has been fit.
    fn is_fitted(&self) -> bool;

    /// Fit and predict in one step.
    fn fit_and_forecast(&mut self, series: &Series, horizon: usize) -> Result<Forecast> {
        self.fit(series)?;
        self.predict(horizon)
    }
}
