//! Error types shared by validation, rate-table loading and scenario loading
//!
//! Formula functions never return these; they fall back to zero/neutral results.

use thiserror::Error;

/// Errors raised by strict validation and CSV loading
#[derive(Debug, Error)]
pub enum CalcError {
    /// A caller-supplied value was rejected (negative count, non-positive price, ...)
    #[error("invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// A rate table failed its structural checks
    #[error("invalid rate table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
