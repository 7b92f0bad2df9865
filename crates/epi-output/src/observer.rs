//! `ReportOutputObserver<W>` — bridges `ReportObserver` to an `OutputWriter`.

use epi_core::TimePoint;
use epi_model::{ReportObserver, SeirReport};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ReportObserver`] that writes every snapshot to any [`OutputWriter`]
/// backend.
///
/// Errors from the writer are stored internally because `ReportObserver`
/// methods have no return value.  After `simulate_with` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct ReportOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReportOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `simulate_with` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer (e.g. to finish it or inspect files).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ReportObserver for ReportOutputObserver<W> {
    fn on_report(&mut self, report: &SeirReport) {
        let result = self.writer.write_report(report);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _now: TimePoint) {
        let result = self.writer.flush();
        self.store_err(result);
    }
}
