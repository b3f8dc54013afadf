//! Constraints and order-by requests addressed to schema columns

use super::ops::Operator;
use super::value::SqlValue;

/// A single WHERE constraint on one column
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Column index within the schema
    pub column: usize,
    /// Comparison operator
    pub op: Operator,
    /// Literal compared against
    pub value: SqlValue,
}

impl Constraint {
    pub fn new(column: usize, op: Operator, value: impl Into<SqlValue>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: usize, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Operator::Eq, value)
    }

    pub fn gt(column: usize, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Operator::Gt, value)
    }

    pub fn ge(column: usize, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Operator::Ge, value)
    }

    pub fn lt(column: usize, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Operator::Lt, value)
    }

    pub fn le(column: usize, value: impl Into<SqlValue>) -> Self {
        Self::new(column, Operator::Le, value)
    }
}

/// An ORDER BY term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Column index within the schema
    pub column: usize,
    /// Descending when true
    pub desc: bool,
}

impl OrderBy {
    pub fn asc(column: usize) -> Self {
        Self {
            column,
            desc: false,
        }
    }

    pub fn desc(column: usize) -> Self {
        Self { column, desc: true }
    }
}
