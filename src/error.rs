//! Error types for the carbon_ai crate

use thiserror::Error;

/// Custom error types for the carbon_ai crate
#[derive(Debug, Error)]
pub enum CarbonError {
    /// Invalid caller-supplied input (empty series, bad horizon, schema mismatch)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation that requires a trained model was called before training
    #[error("Model not ready: {0}")]
    ModelNotReady(String),

    /// The underlying model failed while producing a prediction
    #[error("Prediction failure: {0}")]
    PredictionFailure(String),

    /// Error related to data loading or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, CarbonError>;

impl From<polars::prelude::PolarsError> for CarbonError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        CarbonError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for CarbonError {
    fn from(err: csv::Error) -> Self {
        CarbonError::DataError(err.to_string())
    }
}
