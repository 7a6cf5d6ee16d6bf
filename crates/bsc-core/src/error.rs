//! Error types for bsc

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A record carried a value the analytics refuse to coerce (NaN, negative, bad code)
    #[error("Validation error: {record} {field}: {reason}")]
    Validation {
        record: String,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a validation error for a named record field
    pub fn validation(
        record: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            record: record.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error was caused by caller-supplied data rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::InvalidData(_) | Error::Import(_) | Error::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
