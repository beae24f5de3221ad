//! Fixed-order ARIMA (Autoregressive Integrated Moving Average) model.
//!
//! Order selection is a policy choice, not a search: the pipeline runs
//! ARIMA(2,1,2) over a bounded recency window.

mod diff;
mod model;

pub use diff::{difference, integrate};
pub use model::{Arima, ArimaOrder, DEFAULT_WINDOW};
