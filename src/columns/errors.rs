//! Column error types
//!
//! Error codes:
//! - COLUMN_INVALID_CONTRACT (FATAL)
//!
//! Columns have no user-facing failure modes. Anything surfaced here means
//! the executor routed a constraint to a column that cannot service it.

use std::fmt;

use crate::observability::Severity;
use crate::query::ValueKind;

/// Column error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnErrorCode {
    /// A literal of the wrong kind reached a typed filter
    ColumnInvalidContract,
}

impl ColumnErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ColumnErrorCode::ColumnInvalidContract => "COLUMN_INVALID_CONTRACT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ColumnErrorCode::ColumnInvalidContract => Severity::Fatal,
        }
    }
}

impl fmt::Display for ColumnErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Column error with context
#[derive(Debug, Clone)]
pub struct ColumnError {
    code: ColumnErrorCode,
    column: String,
    message: String,
}

impl ColumnError {
    /// A filter literal of `kind` was handed to a column that only compares numbers
    pub fn invalid_contract(column: impl Into<String>, kind: ValueKind) -> Self {
        let column = column.into();
        Self {
            code: ColumnErrorCode::ColumnInvalidContract,
            message: format!(
                "Column '{}' cannot compare against a {} value",
                column, kind
            ),
            column,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ColumnErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the name of the column that raised the error
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for ColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ColumnError {}

/// Result type for column operations
pub type ColumnResult<T> = Result<T, ColumnError>;
