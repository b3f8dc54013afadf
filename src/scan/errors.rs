//! Scan errors

use thiserror::Error;

use crate::columns::ColumnError;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Scan errors
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    #[error("Constraint on column {index} but the schema has {width} columns")]
    UnknownConstraintColumn { index: usize, width: usize },

    #[error("Order by column {index} but the schema has {width} columns")]
    UnknownSortColumn { index: usize, width: usize },

    #[error("Output column {index} but the schema has {width} columns")]
    UnknownOutputColumn { index: usize, width: usize },

    #[error(transparent)]
    Column(#[from] ColumnError),
}

impl ScanError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::UnknownConstraintColumn { .. }
            | ScanError::UnknownSortColumn { .. }
            | ScanError::UnknownOutputColumn { .. } => "SCAN_UNKNOWN_COLUMN",
            ScanError::Column(e) => e.code().code(),
        }
    }

    /// Whether the scan hit a broken column contract
    pub fn is_fatal(&self) -> bool {
        match self {
            ScanError::Column(e) => e.is_fatal(),
            _ => false,
        }
    }
}
