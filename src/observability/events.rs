//! Observable scan events
//!
//! Every log line the scan path emits names one of these, apart from the
//! `SCAN_BEGIN` / `SCAN_COMPLETE` / `SCAN_FAILED` lifecycle lines, which
//! come from the scan's [`ObservationScope`](super::ObservationScope).

use std::fmt;

/// Observable events of the scan path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Bound filtering narrowed the candidate range
    BoundsComputed,
    /// A residual constraint was evaluated row by row
    FilterApplied,
    /// ORDER BY was satisfied by natural row order
    SortSkipped,
    /// Surviving rows were explicitly sorted
    SortApplied,
    /// A column was handed a value outside its contract (FATAL)
    ContractViolation,
}

impl Event {
    /// Returns the event name as it appears in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BoundsComputed => "BOUNDS_COMPUTED",
            Event::FilterApplied => "FILTER_APPLIED",
            Event::SortSkipped => "SORT_SKIPPED",
            Event::SortApplied => "SORT_APPLIED",
            Event::ContractViolation => "CONTRACT_VIOLATION",
        }
    }

    /// Returns true if this event indicates a broken invariant
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ContractViolation)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
