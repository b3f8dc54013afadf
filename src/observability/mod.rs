//! Observability for the scan path
//!
//! - Structured JSON logging with a process-wide severity threshold
//! - Scan counters
//! - Scoped begin/complete tracing
//!
//! Observability is read-only: nothing here changes what a scan returns.
//!
//! ```ignore
//! use aerocolumn::observability::{Event, Logger, ObservationScope, ScanMetrics};
//!
//! Logger::info("SCAN_COMPLETE", &[("rows", "42")]);
//!
//! let metrics = ScanMetrics::new();
//! metrics.increment_scans_executed();
//!
//! let scope = ObservationScope::new("SCAN");
//! scope.complete(&[]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{ScanMetrics, ScanMetricsSnapshot};
pub use scope::{ObservationScope, Timer};

#[cfg(test)]
pub(crate) use logger::capture;

/// Log a scan event at its default severity
///
/// Fatal events go to stderr at FATAL, everything else at TRACE.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    if event.is_fatal() {
        Logger::fatal(event.as_str(), fields);
    } else {
        Logger::trace(event.as_str(), fields);
    }
}
