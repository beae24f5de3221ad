//! End-to-end forecasting pipeline over a column-classified frame.

use tracing::{debug, warn};

use crate::builder::build_series;
use crate::core::{ModelForecast, ModelKind, Series};
use crate::error::{ForecastError, PipelineError};
use crate::frame::{classify, ColumnClassification, Frame};
use crate::models::{Arima, ArimaOrder, Forecaster, SeasonalModel};

/// Default number of future periods to forecast.
pub const DEFAULT_HORIZON: usize = 30;

/// Orchestrates one frame through classification, series construction and
/// both forecasting models.
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    horizon: usize,
    window: usize,
    order: ArimaOrder,
}

impl Default for ForecastPipeline {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            window: crate::models::arima::DEFAULT_WINDOW,
            order: ArimaOrder::default(),
        }
    }
}

/// Outcome of one pipeline run.
///
/// The two model slots fail independently; a fit error in one never hides
/// the other's forecast.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub classification: ColumnClassification,
    pub seasonal: Result<ModelForecast, ForecastError>,
    pub autoregressive: Result<ModelForecast, ForecastError>,
}

impl RunResult {
    /// The forecasts that succeeded, in model order.
    pub fn forecasts(&self) -> impl Iterator<Item = &ModelForecast> {
        self.seasonal.iter().chain(self.autoregressive.iter())
    }
}

impl ForecastPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of future periods to forecast.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Recency window for the autoregressive model.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Order of the autoregressive model.
    pub fn with_order(mut self, order: ArimaOrder) -> Self {
        self.order = order;
        self
    }

    /// Run both models over `frame` using `date_column` as the time axis and
    /// `target_column` as the value to forecast.
    pub fn run(
        &self,
        frame: &Frame,
        date_column: &str,
        target_column: &str,
    ) -> Result<RunResult, PipelineError> {
        let classification = classify(frame);
        if !classification.has_date_candidates() {
            return Err(PipelineError::NoDateCandidates);
        }

        debug!(
            rows = frame.num_rows(),
            date = date_column,
            target = target_column,
            "building series"
        );
        let series = build_series(frame, date_column, target_column)?;
        debug!(observations = series.len(), "series built");

        let seasonal = self.run_model(ModelKind::Seasonal, &series);
        let autoregressive = self.run_model(ModelKind::Autoregressive, &series);

        Ok(RunResult {
            classification,
            seasonal,
            autoregressive,
        })
    }

    fn run_model(&self, kind: ModelKind, series: &Series) -> Result<ModelForecast, ForecastError> {
        let (mut model, history): (Box<dyn Forecaster>, Series) = match kind {
            ModelKind::Seasonal => (Box::new(SeasonalModel::new()), series.clone()),
            ModelKind::Autoregressive => (
                Box::new(Arima::new(self.order).with_window(self.window)),
                series.tail(self.window),
            ),
        };

        match model.fit_and_forecast(series, self.horizon) {
            Ok(predicted) => {
                debug!(model = kind.name(), points = predicted.len(), "model run complete");
                Ok(ModelForecast {
                    kind,
                    horizon: self.horizon,
                    history,
                    predicted,
                })
            }
            Err(err) => {
                warn!(model = kind.name(), error = %err, "model run failed");
                Err(err)
            }
        }
    }
}
