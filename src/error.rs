//! Error types for the tablecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building a series or fitting a model.
///
/// Errors are `Clone + PartialEq` so a captured failure can live inside a
/// run result next to its sibling model's forecast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A named column does not exist in the frame.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., numerical issues during a fit).
    #[error("computation error: {0}")]
    ComputationError(String),
}

/// Run-level failures reported by the forecast pipeline.
///
/// Per-model fit failures are NOT pipeline errors; they are captured in the
/// run result so the sibling model's outcome survives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The frame has no date-typed or text-typed column to forecast over.
    #[error("no date column available for forecasting")]
    NoDateCandidates,

    /// Series construction failed; neither model was invoked.
    #[error("series construction failed: {0}")]
    Series(#[from] ForecastError),
}
