//! Computed `ts_end` column
//!
//! Every time-based table stores `ts` and `dur`; the end timestamp is their
//! per-row sum and is never materialized. The sum of two sorted sequences is
//! not sorted, so the column offers no bound pruning.

use super::element::filter_numeric;
use super::errors::ColumnResult;
use super::sink::ResultSink;
use super::{directed, row_len, Bounds, ColumnHeader, ColumnType, Comparator, StorageColumn};
use crate::query::{Operator, OrderBy, SqlValue};
use crate::scan::RowIndexFilter;

/// Column reporting `ts[row] + dur[row]`.
#[derive(Debug, Clone)]
pub struct TsEndColumn<'a> {
    header: ColumnHeader,
    ts: &'a [i64],
    dur: &'a [i64],
}

impl<'a> TsEndColumn<'a> {
    /// `ts` and `dur` are parallel sequences of equal length.
    pub fn new(name: impl Into<String>, ts: &'a [i64], dur: &'a [i64]) -> Self {
        Self {
            header: ColumnHeader::new(name, false),
            ts,
            dur,
        }
    }

    /// End timestamp of `row`
    #[inline]
    pub fn end_at(&self, row: u32) -> i64 {
        let row = row as usize;
        self.ts[row].saturating_add(self.dur[row])
    }
}

impl StorageColumn for TsEndColumn<'_> {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn hidden(&self) -> bool {
        self.header.hidden
    }

    fn row_count(&self) -> Option<u32> {
        Some(row_len(self.ts.len().min(self.dur.len())))
    }

    fn report_result(&self, row: u32, sink: &mut dyn ResultSink) {
        sink.report_long(self.end_at(row));
    }

    fn bound_filter(&self, _op: Operator, _value: &SqlValue) -> Bounds {
        Bounds::full(row_len(self.ts.len().min(self.dur.len())))
    }

    fn filter(
        &self,
        op: Operator,
        value: &SqlValue,
        index: &mut RowIndexFilter,
    ) -> ColumnResult<()> {
        filter_numeric(self.name(), op, value, index, |row| self.end_at(row))
    }

    fn sort(&self, order_by: &OrderBy) -> Comparator<'_> {
        directed(order_by, move |a, b| self.end_at(a).cmp(&self.end_at(b)))
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Ulong
    }

    fn is_naturally_ordered(&self) -> bool {
        false
    }
}
