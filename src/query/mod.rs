//! Query vocabulary shared by columns and the scan driver
//!
//! Everything here is produced by the executor's constraint parser and
//! consumed by columns:
//! - Comparison operators (`Operator`)
//! - Dynamic literal values (`SqlValue`)
//! - Per-column constraints and order-by requests

mod ops;
mod order;
mod value;

pub use ops::Operator;
pub use order::{Constraint, OrderBy};
pub use value::{SqlValue, ValueKind};
