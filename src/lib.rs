//! # tablecast
//!
//! Forecasting over raw tabular data.
//!
//! Takes a [`Frame`](frame::Frame) of typed columns, classifies columns
//! into numeric, categorical and date-candidate roles, coerces a chosen
//! date/target pair into a canonical [`Series`](core::Series), and runs
//! two independent models over it: an additive trend-plus-seasonality
//! model and a fixed-order ARIMA over a bounded recency window. Each
//! model's outcome is reported separately, so a failing fit never hides
//! the other model's forecast.

#![allow(clippy::needless_range_loop)]

pub mod builder;
pub mod core;
pub mod error;
pub mod frame;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use error::{ForecastError, PipelineError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, ModelForecast, ModelKind, Series};
    pub use crate::error::{ForecastError, PipelineError, Result};
    pub use crate::frame::{classify, Column, ColumnClassification, Frame};
    pub use crate::models::{Arima, ArimaOrder, Forecaster, SeasonalModel};
    pub use crate::pipeline::{ForecastPipeline, RunResult};
}
