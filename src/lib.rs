//! aerocolumn - column views for a virtual-table query executor
//!
//! Exposes in-memory columnar storage to a SQL executor: per-column bounds,
//! row filtering, sort comparators and result reporting, plus a scan driver
//! that chains them.

pub mod columns;
pub mod config;
pub mod observability;
pub mod query;
pub mod scan;
