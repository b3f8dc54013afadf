//! Scan counters
//!
//! - Counters only, monotonic
//! - Reset only when the registry is created
//! - Thread-safe, Relaxed atomics

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for every scan a scanner runs
#[derive(Debug, Default)]
pub struct ScanMetrics {
    scans_executed: AtomicU64,
    scans_failed: AtomicU64,
    rows_considered: AtomicU64,
    rows_returned: AtomicU64,
    constraints_consumed: AtomicU64,
    filters_applied: AtomicU64,
    sorts_performed: AtomicU64,
    sorts_skipped: AtomicU64,
}

impl ScanMetrics {
    /// Creates a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a completed scan
    pub fn increment_scans_executed(&self) {
        self.scans_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a rejected or aborted scan
    pub fn increment_scans_failed(&self) {
        self.scans_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds rows left in the candidate range after bound pruning
    pub fn add_rows_considered(&self, rows: u64) {
        self.rows_considered.fetch_add(rows, Ordering::Relaxed);
    }

    /// Adds rows reported to the sink
    pub fn add_rows_returned(&self, rows: u64) {
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    /// Adds constraints fully answered by bounds
    pub fn add_constraints_consumed(&self, count: u64) {
        self.constraints_consumed.fetch_add(count, Ordering::Relaxed);
    }

    /// Adds constraints evaluated row by row
    pub fn add_filters_applied(&self, count: u64) {
        self.filters_applied.fetch_add(count, Ordering::Relaxed);
    }

    /// Counts an explicit sort
    pub fn increment_sorts_performed(&self) {
        self.sorts_performed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts an ORDER BY satisfied by natural order
    pub fn increment_sorts_skipped(&self) {
        self.sorts_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> ScanMetricsSnapshot {
        ScanMetricsSnapshot {
            scans_executed: self.scans_executed.load(Ordering::Relaxed),
            scans_failed: self.scans_failed.load(Ordering::Relaxed),
            rows_considered: self.rows_considered.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            constraints_consumed: self.constraints_consumed.load(Ordering::Relaxed),
            filters_applied: self.filters_applied.load(Ordering::Relaxed),
            sorts_performed: self.sorts_performed.load(Ordering::Relaxed),
            sorts_skipped: self.sorts_skipped.load(Ordering::Relaxed),
        }
    }

    /// Every counter as one JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time copy of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanMetricsSnapshot {
    pub scans_executed: u64,
    pub scans_failed: u64,
    pub rows_considered: u64,
    pub rows_returned: u64,
    pub constraints_consumed: u64,
    pub filters_applied: u64,
    pub sorts_performed: u64,
    pub sorts_skipped: u64,
}
