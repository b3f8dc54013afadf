//! String column over interned string ids
//!
//! The storage engine writes the empty string for absent values, so an empty
//! string is reported as NULL. Sorting still sees it as the empty string.
//!
//! Per-row string predicates are not evaluated here: `filter` keeps every
//! row and the executor applies its own generic fallback.

use super::errors::ColumnResult;
use super::sink::ResultSink;
use super::{
    directed, row_len, Bounds, ColumnHeader, ColumnType, Comparator, StorageColumn, StringId,
};
use crate::query::{Operator, OrderBy, SqlValue};
use crate::scan::RowIndexFilter;

/// A column of string ids resolved through a shared string table.
#[derive(Debug, Clone)]
pub struct StringColumn<'a, Id: StringId> {
    header: ColumnHeader,
    ids: &'a [Id],
    strings: &'a [String],
}

impl<'a, Id: StringId> StringColumn<'a, Id> {
    pub fn new(name: impl Into<String>, ids: &'a [Id], strings: &'a [String], hidden: bool) -> Self {
        Self {
            header: ColumnHeader::new(name, hidden),
            ids,
            strings,
        }
    }

    /// Resolved text at `row`
    #[inline]
    pub fn text_at(&self, row: u32) -> &'a str {
        let strings = self.strings;
        &strings[self.ids[row as usize].index()]
    }
}

impl<Id: StringId> StorageColumn for StringColumn<'_, Id> {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn hidden(&self) -> bool {
        self.header.hidden
    }

    fn row_count(&self) -> Option<u32> {
        Some(row_len(self.ids.len()))
    }

    fn report_result(&self, row: u32, sink: &mut dyn ResultSink) {
        let text = self.text_at(row);
        if text.is_empty() {
            sink.report_null();
        } else {
            sink.report_text(text);
        }
    }

    fn bound_filter(&self, _op: Operator, _value: &SqlValue) -> Bounds {
        Bounds::full(row_len(self.ids.len()))
    }

    fn filter(
        &self,
        _op: Operator,
        _value: &SqlValue,
        _index: &mut RowIndexFilter,
    ) -> ColumnResult<()> {
        Ok(())
    }

    fn sort(&self, order_by: &OrderBy) -> Comparator<'_> {
        directed(order_by, move |a, b| self.text_at(a).cmp(self.text_at(b)))
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::String
    }

    fn is_naturally_ordered(&self) -> bool {
        false
    }
}
