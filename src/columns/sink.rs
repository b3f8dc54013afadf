//! Result reporting sink
//!
//! The executor hands a sink to `report_result`; each call emits exactly one
//! typed value for one (row, column) pair.

/// Receives typed column values during the report phase.
pub trait ResultSink {
    /// Called once before the columns of `row` are reported
    fn begin_row(&mut self, _row: u32) {}

    /// Emit an integer value
    fn report_long(&mut self, value: i64);

    /// Emit a floating point value
    fn report_double(&mut self, value: f64);

    /// Emit a text value
    fn report_text(&mut self, value: &str);

    /// Emit NULL
    fn report_null(&mut self);
}
