//! Numeric utilities shared by the forecasting models.

pub mod optimization;
pub mod regression;

pub use optimization::{minimize, MinimizeConfig};
pub use regression::{ols_line, ridge_solve};
