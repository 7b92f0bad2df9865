//! Run observer trait for progress reporting and data collection.

use epi_core::TimePoint;

use crate::SeirReport;

/// Callbacks invoked by [`Model::simulate_with`][crate::Model::simulate_with].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — print each snapshot
///
/// ```rust,ignore
/// struct Printer;
///
/// impl ReportObserver for Printer {
///     fn on_report(&mut self, r: &SeirReport) {
///         println!("{}: S={} E={} I={} R={}", r.time, r.susceptible, r.exposed, r.infectious, r.recovered);
///     }
/// }
/// ```
pub trait ReportObserver {
    /// Called once before the first event of a `simulate` call.
    fn on_sim_start(&mut self, _now: TimePoint, _stop: TimePoint) {}

    /// Called for every snapshot appended to the timeline.
    fn on_report(&mut self, _report: &SeirReport) {}

    /// Called once after the run loop exits, with the final clock.
    fn on_sim_end(&mut self, _now: TimePoint) {}
}

/// A [`ReportObserver`] that does nothing.
pub struct NoopObserver;

impl ReportObserver for NoopObserver {}
