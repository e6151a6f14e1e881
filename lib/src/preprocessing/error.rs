//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Shape mismatch between expected and actual matrix dimensions.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Numerical computation error (non-finite input, overflow, etc.).
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// Invalid hyperparameter value or unexpected input value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
}
