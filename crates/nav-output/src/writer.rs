//! The `TraceWriter` trait implemented by trace backends.

use crate::{OutputResult, RouteRow, TraceRow};

/// Errors are stored by [`TraceObserver`][crate::TraceObserver] and
/// retrieved with `take_error` after the run.
pub trait TraceWriter {
    fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()>;

    /// Write every point of one installed route.
    fn write_route(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    /// Flush all underlying handles.  Called at the end of every run, so a
    /// driver may run the navigator in several phases against one writer.
    fn flush(&mut self) -> OutputResult<()>;
}
