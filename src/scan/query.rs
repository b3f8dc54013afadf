//! One scan request: constraints, ordering and requested output columns

use crate::query::{Constraint, OrderBy};

/// What the executor asks of a single scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanQuery {
    /// WHERE constraints (AND semantics)
    pub constraints: Vec<Constraint>,
    /// ORDER BY terms, most significant first
    pub order_by: Vec<OrderBy>,
    /// Output column indices; empty means every column
    pub columns: Vec<usize>,
}

impl ScanQuery {
    /// Creates an unconstrained, unordered scan of every column
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds an ORDER BY term
    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    /// Restricts the reported columns
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Returns true when the scan only needs the natural row order
    pub fn is_unordered(&self) -> bool {
        self.order_by.is_empty()
    }
}
