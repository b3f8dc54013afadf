//! Synthetic row identity column
//!
//! A `RowId` packs the owning table and the row index into one value so that
//! rows of different tables can be referenced from a single column:
//!
//! ```text
//! |-------------- 64 bits --------------|
//! | unused | table id |    row index    |
//! | 24 bits|  8 bits  |     32 bits     |
//! ```
//!
//! The layout is stable for the life of a storage instance and invertible
//! with [`parse_row_id`].

use super::element::filter_numeric;
use super::errors::ColumnResult;
use super::sink::ResultSink;
use super::{directed, Bounds, ColumnHeader, ColumnType, Comparator, NumericElement, StorageColumn};
use crate::query::{Operator, OrderBy, SqlValue};
use crate::scan::RowIndexFilter;

/// Opaque (table, row) reference
pub type RowId = u64;

/// Bit offset of the table id inside a [`RowId`]
pub const ROW_ID_TABLE_SHIFT: u32 = 32;

/// Identity of a storage table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u8);

/// Packs `table` and `row` into a [`RowId`]
#[inline]
pub fn create_row_id(table: TableId, row: u32) -> RowId {
    (u64::from(table.0) << ROW_ID_TABLE_SHIFT) | u64::from(row)
}

/// Recovers the table and row packed by [`create_row_id`]
#[inline]
pub fn parse_row_id(id: RowId) -> (TableId, u32) {
    let table = ((id >> ROW_ID_TABLE_SHIFT) & 0xFF) as u8;
    let row = (id & u64::from(u32::MAX)) as u32;
    (TableId(table), row)
}

/// Column reporting the [`RowId`] of each row of one table.
///
/// Acts as a foreign key into tables that reference rows by id.
#[derive(Debug, Clone)]
pub struct IdColumn {
    header: ColumnHeader,
    table: TableId,
}

impl IdColumn {
    pub fn new(name: impl Into<String>, table: TableId) -> Self {
        Self {
            header: ColumnHeader::new(name, false),
            table,
        }
    }

    /// The table this column identifies rows of
    pub fn table(&self) -> TableId {
        self.table
    }
}

impl StorageColumn for IdColumn {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn hidden(&self) -> bool {
        self.header.hidden
    }

    fn row_count(&self) -> Option<u32> {
        None
    }

    fn report_result(&self, row: u32, sink: &mut dyn ResultSink) {
        create_row_id(self.table, row).report(sink);
    }

    /// Ids grow with the row index but no pruning is attempted.
    fn bound_filter(&self, _op: Operator, _value: &SqlValue) -> Bounds {
        Bounds::default()
    }

    fn filter(
        &self,
        op: Operator,
        value: &SqlValue,
        index: &mut RowIndexFilter,
    ) -> ColumnResult<()> {
        let table = self.table;
        filter_numeric(self.name(), op, value, index, |row| create_row_id(table, row))
    }

    fn sort(&self, order_by: &OrderBy) -> Comparator<'_> {
        let table = self.table;
        directed(order_by, move |a, b| {
            create_row_id(table, a).cmp(&create_row_id(table, b))
        })
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Ulong
    }

    fn is_naturally_ordered(&self) -> bool {
        false
    }
}
