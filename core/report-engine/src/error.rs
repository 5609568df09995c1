//! FILENAME: core/report-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Row {row} has {found} metric values but the report declares {expected} metric headers")]
    MetricArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NormalizeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        NormalizeError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
