//! ObservationScope for begin/complete logging around one scan
//!
//! - Logs `{name}_BEGIN` on creation (TRACE)
//! - Logs `{name}_COMPLETE` with elapsed time on `complete` (INFO)
//! - Logs `{name}_FAILED` on `fail` (ERROR or FATAL)
//! - Logs `{name}_INCOMPLETE` on drop otherwise (WARN)

use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that logs the lifecycle of one operation
pub struct ObservationScope {
    name: &'static str,
    fields: Vec<(&'static str, String)>,
    timer: Timer,
    finished: bool,
}

impl ObservationScope {
    /// Opens a scope and logs `{name}_BEGIN`
    pub fn new(name: &'static str) -> Self {
        Self::with_fields(name, Vec::new())
    }

    /// Opens a scope whose fields are repeated on every line it logs
    pub fn with_fields(name: &'static str, fields: Vec<(&'static str, String)>) -> Self {
        let scope = Self {
            name,
            fields,
            timer: Timer::new(),
            finished: false,
        };
        scope.emit(Severity::Trace, "BEGIN", &[]);
        scope
    }

    /// Logs `{name}_COMPLETE` with `elapsed_us` and `extra` fields
    pub fn complete(mut self, extra: &[(&str, &str)]) {
        self.finished = true;
        let elapsed = self.timer.elapsed_us().to_string();
        let mut fields: Vec<(&str, &str)> = extra.to_vec();
        fields.push(("elapsed_us", elapsed.as_str()));
        self.emit(Severity::Info, "COMPLETE", &fields);
    }

    /// Logs `{name}_FAILED`, at FATAL when `fatal` is set
    pub fn fail(mut self, reason: &str, fatal: bool) {
        self.finished = true;
        let severity = if fatal { Severity::Fatal } else { Severity::Error };
        self.emit(severity, "FAILED", &[("reason", reason)]);
    }

    /// Returns true once `complete` or `fail` ran
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Name of the line logged for one lifecycle stage
    pub fn event_name(&self, stage: &str) -> String {
        format!("{}_{}", self.name, stage)
    }

    fn emit(&self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        if !Logger::enabled(severity) {
            return;
        }
        let event = self.event_name(suffix);
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        fields.extend_from_slice(extra);
        if severity >= Severity::Error {
            Logger::log_stderr(severity, &event, &fields);
        } else {
            Logger::log(severity, &event, &fields);
        }
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.finished {
            self.emit(
                Severity::Warn,
                "INCOMPLETE",
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Monotonic elapsed-time timer
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed microseconds
    pub fn elapsed_us(&self) -> u128 {
        self.start.elapsed().as_micros()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::capture;

    #[test]
    fn test_scope_starts_unfinished() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_finished());
        scope.complete(&[]);
    }

    #[test]
    fn test_scope_with_fields_complete() {
        let scope = ObservationScope::with_fields("TEST", vec![("columns", "3".to_string())]);
        scope.complete(&[("rows_returned", "7")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("unknown column", false);
    }

    #[test]
    fn test_scope_fail_fatal() {
        let scope = ObservationScope::new("TEST");
        scope.fail("contract violated", true);
    }

    /// Lifecycle lines are named after the scope
    #[test]
    fn test_scope_event_names() {
        let scope = ObservationScope::new("SCAN");
        assert_eq!(scope.event_name("BEGIN"), "SCAN_BEGIN");
        assert_eq!(scope.event_name("FAILED"), "SCAN_FAILED");
        scope.complete(&[]);
    }

    /// Failure lines carry the reason and the requested severity
    #[test]
    fn test_scope_failure_severity() {
        capture::start();
        ObservationScope::new("SCAN").fail("unknown column", false);
        ObservationScope::new("SCAN").fail("contract violated", true);
        let lines = capture::finish();

        let failed: Vec<_> = lines
            .iter()
            .filter(|line| line["event"] == "SCAN_FAILED")
            .collect();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0]["severity"], "ERROR");
        assert_eq!(failed[0]["reason"], "unknown column");
        assert_eq!(failed[1]["severity"], "FATAL");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }

    #[test]
    fn test_timer_monotonic() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let first = timer.elapsed_us();
        assert!(first >= 2_000);
        assert!(timer.elapsed_us() >= first);
    }
}
