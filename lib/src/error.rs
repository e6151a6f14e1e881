//! Crate-level error type.
//!
//! Every stage of the price pipeline (loading, splitting, encoding, training,
//! evaluation) reports failures through [`Error`]. None of them are recovered
//! internally; they propagate to the process boundary.

use crate::preprocessing::error::PreprocessingError;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pipeline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file does not exist.
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input file does not match the listing schema (missing column,
    /// unparsable value, malformed record).
    #[error("data format error: {0}")]
    DataFormat(String),

    /// The optimizer failed to converge or hit a numeric instability.
    #[error("training error: {0}")]
    Training(String),

    /// A feature transformer was misused (empty fit data, shape mismatch, ...).
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),

    /// A metric is mathematically undefined for the given labels.
    #[error("undefined metric: {0}")]
    UndefinedMetric(String),

    /// A caller-supplied parameter is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other I/O failure while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
