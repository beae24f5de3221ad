//! Forecasting models.

pub mod arima;
pub mod seasonal;
mod traits;

pub use arima::{Arima, ArimaOrder};
pub use seasonal::SeasonalModel;
pub use traits::Forecaster;
