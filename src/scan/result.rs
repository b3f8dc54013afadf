//! Result types for table scans

use crate::columns::ResultSink;
use crate::query::SqlValue;

/// Summary of one completed scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Rows in the range left after bound pruning
    pub rows_considered: u32,
    /// Rows that survived filtering and were reported
    pub rows_returned: u32,
    /// Constraints answered entirely by bounds
    pub constraints_consumed: u32,
    /// Constraints evaluated row by row
    pub filters_applied: u32,
    /// Whether an explicit sort ran
    pub sorted: bool,
}

/// One reported row
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Storage row index
    pub row: u32,
    /// Reported values, in requested column order
    pub values: Vec<SqlValue>,
}

/// A [`ResultSink`] that materializes reported rows.
#[derive(Debug, Clone, Default)]
pub struct RowCollector {
    rows: Vec<ResultRow>,
}

impl RowCollector {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected rows in report order
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Storage row indices in report order
    pub fn row_indices(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.row).collect()
    }

    /// Values of column position `col` for every row
    pub fn column_values(&self, col: usize) -> Vec<SqlValue> {
        self.rows
            .iter()
            .filter_map(|r| r.values.get(col).cloned())
            .collect()
    }

    /// Number of collected rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing was collected
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the collector
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    fn push(&mut self, value: SqlValue) {
        match self.rows.last_mut() {
            Some(current) => current.values.push(value),
            None => self.rows.push(ResultRow {
                row: 0,
                values: vec![value],
            }),
        }
    }
}

impl ResultSink for RowCollector {
    fn begin_row(&mut self, row: u32) {
        self.rows.push(ResultRow {
            row,
            values: Vec::new(),
        });
    }

    fn report_long(&mut self, value: i64) {
        self.push(SqlValue::Integer(value));
    }

    fn report_double(&mut self, value: f64) {
        self.push(SqlValue::Float(value));
    }

    fn report_text(&mut self, value: &str) {
        self.push(SqlValue::text(value));
    }

    fn report_null(&mut self) {
        self.push(SqlValue::Null);
    }
}
