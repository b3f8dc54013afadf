//! Table scan subsystem
//!
//! Turns a [`ScanQuery`] into reported rows using the column views of a
//! [`StorageSchema`].
//!
//! # Scan Flow (strict order)
//!
//! 1. Snapshot the row count
//! 2. Validate column indices
//! 3. Narrow the candidate range with column bounds
//! 4. Filter residual constraints row by row
//! 5. Sort, or skip the sort when natural order suffices
//! 6. Report output columns per surviving row
//!
//! # Invariants
//!
//! - Pruned and unpruned scans return the same rows in the same order
//! - A scan that fails reports nothing
//! - Contract violations are fatal and logged

mod errors;
mod query;
mod result;
mod row_index;
mod scanner;
mod schema;
mod sorter;

pub use errors::{ScanError, ScanResult};
pub use query::ScanQuery;
pub use result::{ResultRow, RowCollector, ScanStats};
pub use row_index::RowIndexFilter;
pub use scanner::TableScanner;
pub use schema::StorageSchema;
pub use sorter::RowSorter;
