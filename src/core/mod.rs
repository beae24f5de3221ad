//! Core data structures for series construction and forecast results.

mod forecast;
mod series;

pub use forecast::{Forecast, ModelForecast, ModelKind};
pub use series::Series;
