//! Column views over storage for the virtual-table executor
//!
//! Every column answers the three questions the executor asks during a scan:
//!
//! 1. `bound_filter`: can the candidate row range be narrowed up front?
//! 2. `filter`: which rows in the candidate set satisfy `op value`?
//! 3. `sort`: how do two rows compare for an ORDER BY term?
//!
//! # Borrowed storage
//!
//! Columns never own data. They hold slices into sequences owned by the
//! storage engine, which only ever appends and never rewrites a written
//! position. A slice is therefore a stable snapshot for the whole scan: rows
//! appended after the view was taken are simply not visited, and the borrow
//! prevents the storage from reallocating underneath a live view.
//!
//! # Column kinds
//!
//! - `NumericColumn<T>`: dense values, optionally sorted (binary-search bounds)
//! - `StringColumn<Id>`: interned string ids, empty string reported as NULL
//! - `TsEndColumn`: `ts + dur` computed per row
//! - `IdColumn`: synthetic `RowId` of each row

mod element;
mod errors;
mod id;
mod numeric;
mod sink;
mod string;
mod ts_end;

use std::cmp::Ordering;
use std::fmt;

use crate::query::{Operator, OrderBy, SqlValue};
use crate::scan::RowIndexFilter;

pub use element::{NumericElement, StringId};
pub use errors::{ColumnError, ColumnErrorCode, ColumnResult};
pub use id::{create_row_id, parse_row_id, IdColumn, RowId, TableId, ROW_ID_TABLE_SHIFT};
pub use numeric::NumericColumn;
pub use sink::ResultSink;
pub use string::StringColumn;
pub use ts_end::TsEndColumn;

pub(crate) use element::filter_numeric;

/// Compares the values of two rows
pub type Comparator<'c> = Box<dyn Fn(u32, u32) -> Ordering + 'c>;

/// A contiguous, half-open row range `[min_idx, max_idx)` that contains
/// every row able to satisfy a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// First row that may match
    pub min_idx: u32,
    /// One past the last row that may match
    pub max_idx: u32,
    /// True when every row in the range matches, so no per-row filtering
    /// is needed for this constraint
    pub consumed: bool,
}

impl Default for Bounds {
    /// The whole table, with the length left to the caller
    fn default() -> Self {
        Self {
            min_idx: 0,
            max_idx: u32::MAX,
            consumed: false,
        }
    }
}

impl Bounds {
    /// Unconsumed range over the first `len` rows
    pub fn full(len: u32) -> Self {
        Self {
            min_idx: 0,
            max_idx: len,
            consumed: false,
        }
    }

    /// Number of rows in the range
    pub fn len(&self) -> u32 {
        self.max_idx.saturating_sub(self.min_idx)
    }

    /// Returns true if no row can match
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `row` lies inside the range
    pub fn contains(&self, row: u32) -> bool {
        row >= self.min_idx && row < self.max_idx
    }

    /// Intersects two ranges.
    ///
    /// The result is consumed only if both inputs were.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let min_idx = self.min_idx.max(other.min_idx);
        let max_idx = self.max_idx.min(other.max_idx).max(min_idx);
        Bounds {
            min_idx,
            max_idx,
            consumed: self.consumed && other.consumed,
        }
    }
}

/// Declared relational type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 32-bit signed integer
    Int,
    /// Unsigned integer
    Uint,
    /// 64-bit signed integer
    Long,
    /// 64-bit unsigned integer
    Ulong,
    /// 64-bit floating point
    Double,
    /// UTF-8 text
    String,
}

impl ColumnType {
    /// Type name used when rendering the table schema as SQL
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Int => "INT",
            ColumnType::Uint => "UNSIGNED INT",
            ColumnType::Long => "BIG INT",
            ColumnType::Ulong => "UNSIGNED BIG INT",
            ColumnType::Double => "DOUBLE",
            ColumnType::String => "STRING",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_type())
    }
}

/// A relational column backed by storage.
///
/// Implementations are read-only views; every method is free of side effects
/// except `filter`, which narrows the index it is given.
pub trait StorageColumn {
    /// Column name
    fn name(&self) -> &str;

    /// Whether the column is hidden from `SELECT *`
    fn hidden(&self) -> bool;

    /// Number of rows visible through this view.
    ///
    /// `None` for columns with no storage of their own.
    fn row_count(&self) -> Option<u32>;

    /// Emits the value at `row` to the sink
    fn report_result(&self, row: u32, sink: &mut dyn ResultSink);

    /// Returns the tightest row range provably containing every match for
    /// `op value`. Never excludes a matching row.
    fn bound_filter(&self, op: Operator, value: &SqlValue) -> Bounds;

    /// Narrows `index` to rows satisfying `op value`
    fn filter(&self, op: Operator, value: &SqlValue, index: &mut RowIndexFilter)
        -> ColumnResult<()>;

    /// Returns a comparator for the ORDER BY term
    fn sort(&self, order_by: &OrderBy) -> Comparator<'_>;

    /// Declared relational type
    fn column_type(&self) -> ColumnType;

    /// Whether the storage is sorted ascending, enabling bound pruning
    fn is_naturally_ordered(&self) -> bool;
}

/// Shared name/visibility fields of every column
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnHeader {
    pub(crate) name: String,
    pub(crate) hidden: bool,
}

impl ColumnHeader {
    pub(crate) fn new(name: impl Into<String>, hidden: bool) -> Self {
        Self {
            name: name.into(),
            hidden,
        }
    }
}

/// Converts a slice length into the row index space
#[inline]
pub(crate) fn row_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Wraps an ascending comparator so it honors `order_by.desc`
pub(crate) fn directed<'c, F>(order_by: &OrderBy, ascending: F) -> Comparator<'c>
where
    F: Fn(u32, u32) -> Ordering + 'c,
{
    if order_by.desc {
        Box::new(move |a, b| ascending(a, b).reverse())
    } else {
        Box::new(ascending)
    }
}

/// Creates a boxed numeric column
pub fn numeric_column<'a, T: NumericElement>(
    name: impl Into<String>,
    values: &'a [T],
    hidden: bool,
    naturally_ordered: bool,
) -> Box<dyn StorageColumn + 'a> {
    Box::new(NumericColumn::new(name, values, hidden, naturally_ordered))
}

/// Creates a boxed string column
pub fn string_column<'a, Id: StringId>(
    name: impl Into<String>,
    ids: &'a [Id],
    strings: &'a [String],
    hidden: bool,
) -> Box<dyn StorageColumn + 'a> {
    Box::new(StringColumn::new(name, ids, strings, hidden))
}

/// Creates a boxed `ts + dur` column
pub fn ts_end_column<'a>(
    name: impl Into<String>,
    ts: &'a [i64],
    dur: &'a [i64],
) -> Box<dyn StorageColumn + 'a> {
    Box::new(TsEndColumn::new(name, ts, dur))
}

/// Creates a boxed row-id column
pub fn id_column<'a>(name: impl Into<String>, table: TableId) -> Box<dyn StorageColumn + 'a> {
    Box::new(IdColumn::new(name, table))
}
