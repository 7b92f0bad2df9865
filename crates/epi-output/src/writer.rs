//! The `OutputWriter` trait implemented by all backend writers.

use epi_model::SeirReport;

use crate::OutputResult;

/// Trait implemented by output backends.
///
/// Errors are returned here but swallowed by the observer, which keeps the
/// first one for [`ReportOutputObserver::take_error`][crate::ReportOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one snapshot.
    fn write_report(&mut self, report: &SeirReport) -> OutputResult<()>;

    /// Push buffered rows to the underlying file.  Called at the end of every
    /// `simulate`, so the file is readable between runs.
    fn flush(&mut self) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
