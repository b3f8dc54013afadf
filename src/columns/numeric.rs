//! Numeric column over a dense slice of fixed-width values
//!
//! When the storage is declared naturally ordered, range and equality
//! constraints are answered by binary search and marked consumed.

use super::element::{filter_numeric, Literal, ValueRange};
use super::errors::ColumnResult;
use super::sink::ResultSink;
use super::{
    directed, row_len, Bounds, ColumnHeader, ColumnType, Comparator, NumericElement,
    StorageColumn,
};
use crate::query::{Operator, OrderBy, SqlValue};
use crate::scan::RowIndexFilter;

/// A column of numeric data backed by a borrowed slice.
#[derive(Debug, Clone)]
pub struct NumericColumn<'a, T: NumericElement> {
    header: ColumnHeader,
    values: &'a [T],
    naturally_ordered: bool,
}

impl<'a, T: NumericElement> NumericColumn<'a, T> {
    /// Creates a column view.
    ///
    /// `naturally_ordered` is a promise that `values` is sorted ascending for
    /// as long as the view lives. It is not checked.
    pub fn new(
        name: impl Into<String>,
        values: &'a [T],
        hidden: bool,
        naturally_ordered: bool,
    ) -> Self {
        Self {
            header: ColumnHeader::new(name, hidden),
            values,
            naturally_ordered,
        }
    }

    /// The underlying values
    pub fn values(&self) -> &'a [T] {
        self.values
    }
}

impl<T: NumericElement> StorageColumn for NumericColumn<'_, T> {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn hidden(&self) -> bool {
        self.header.hidden
    }

    fn row_count(&self) -> Option<u32> {
        Some(row_len(self.values.len()))
    }

    fn report_result(&self, row: u32, sink: &mut dyn ResultSink) {
        self.values[row as usize].report(sink);
    }

    fn bound_filter(&self, op: Operator, value: &SqlValue) -> Bounds {
        let bounds = Bounds::full(row_len(self.values.len()));
        if !self.naturally_ordered {
            return bounds;
        }

        let literal = match Literal::for_element::<T>(value) {
            Some(literal) => literal,
            None => return bounds,
        };

        let range = ValueRange::resolve::<T>(op, literal);
        if range.is_unbounded() {
            return bounds;
        }

        // lower_bound, then upper_bound searched from the lower bound onwards
        let min_idx = self.values.partition_point(|v| !range.admits_lower(*v));
        let max_idx = min_idx
            + self.values[min_idx..].partition_point(|v| range.admits_upper(*v));

        Bounds {
            min_idx: row_len(min_idx),
            max_idx: row_len(max_idx),
            consumed: true,
        }
    }

    fn filter(
        &self,
        op: Operator,
        value: &SqlValue,
        index: &mut RowIndexFilter,
    ) -> ColumnResult<()> {
        let values = self.values;
        filter_numeric(self.name(), op, value, index, |row| values[row as usize])
    }

    fn sort(&self, order_by: &OrderBy) -> Comparator<'_> {
        let values = self.values;
        directed(order_by, move |a, b| {
            values[a as usize].compare(&values[b as usize])
        })
    }

    fn column_type(&self) -> ColumnType {
        T::COLUMN_TYPE
    }

    fn is_naturally_ordered(&self) -> bool {
        self.naturally_ordered
    }
}
