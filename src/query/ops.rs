//! Comparison operators
//!
//! The vocabulary mirrors SQLite's virtual-table constraint operators so an
//! executor can hand its codes straight through via [`Operator::from_sqlite_code`].

use std::fmt;

/// A comparison operator from a WHERE constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// column = value
    Eq,
    /// column != value
    Ne,
    /// column < value
    Lt,
    /// column <= value
    Le,
    /// column > value
    Gt,
    /// column >= value
    Ge,
    /// column IS NULL
    IsNull,
    /// column IS NOT NULL
    IsNotNull,
    /// column GLOB value
    Glob,
    /// column LIKE value
    Like,
    /// Engine-specific operator passed through opaquely
    Other(u8),
}

impl Operator {
    /// Maps a SQLite `SQLITE_INDEX_CONSTRAINT_*` code.
    ///
    /// Codes with no dedicated variant become [`Operator::Other`].
    pub fn from_sqlite_code(code: u8) -> Self {
        match code {
            2 => Operator::Eq,
            4 => Operator::Gt,
            8 => Operator::Le,
            16 => Operator::Lt,
            32 => Operator::Ge,
            65 => Operator::Like,
            66 => Operator::Glob,
            68 => Operator::Ne,
            70 => Operator::IsNotNull,
            71 => Operator::IsNull,
            other => Operator::Other(other),
        }
    }

    /// Returns true for `>` and `>=`.
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Ge)
    }

    /// Returns true for `<` and `<=`.
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Operator::Lt | Operator::Le)
    }

    /// Returns true for operators a sorted column can turn into an index range.
    pub fn is_narrowing(&self) -> bool {
        matches!(self, Operator::Eq) || self.is_lower_bound() || self.is_upper_bound()
    }

    /// Applies the operator to a stored value and a literal.
    ///
    /// Stored numeric values are never null, so `IS NOT NULL` always holds
    /// and `IS NULL` never does. Pattern and opaque operators never match.
    #[inline]
    pub fn test<C: PartialOrd>(&self, stored: C, literal: C) -> bool {
        match self {
            Operator::Eq => stored == literal,
            Operator::Ne => stored != literal,
            Operator::Lt => stored < literal,
            Operator::Le => stored <= literal,
            Operator::Gt => stored > literal,
            Operator::Ge => stored >= literal,
            Operator::IsNotNull => true,
            Operator::IsNull | Operator::Glob | Operator::Like | Operator::Other(_) => false,
        }
    }

    /// Returns the operator's SQL spelling for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::Glob => "GLOB",
            Operator::Like => "LIKE",
            Operator::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Other(code) => write!(f, "OTHER({})", code),
            op => write!(f, "{}", op.as_str()),
        }
    }
}
