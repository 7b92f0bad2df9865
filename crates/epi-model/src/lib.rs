//! `epi-model` — the discrete-event run loop and public API of the epideux
//! epidemic simulator.
//!
//! # Run loop
//!
//! ```text
//! simulate(duration):
//!   stop ← now + duration
//!   ① Reports   — push ReportSeir at every unscheduled grid point
//!                 start + k·interval within [now, stop].
//!   ② Events    — pop entries with time ≤ stop in (time, insertion) order:
//!                   ReportSeir          → update every location, append S/E/I/R
//!                   BeginEntry(p, e)    → move p to e.location (preempts)
//!                   EndEntry(p, e)      → move p home if e is still active
//!                   StopSim             → end this run early
//!   ③ Clock     — land exactly on stop (unless StopSim ended the run).
//! ```
//!
//! Infection is never stepped on a grid.  Each location charges the interval
//! since its last update whenever its population changes or a snapshot is
//! taken; see `epi_population::Location`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_core::{ModelConfig, SimDuration};
//! use epi_model::ModelBuilder;
//!
//! let mut model = ModelBuilder::new(ModelConfig::default()).seed(7).start_date(2020, 4, 1).build()?;
//! let home = model.create_location(0.7, "home")?;
//! for _ in 0..1_000 {
//!     model.create_person(home, SimDuration::days(4), SimDuration::days(5))?;
//! }
//! model.infect(PersonId(0))?;
//! model.simulate(SimDuration::days(60))?;
//! println!("{:?}", model.get_daily_reports().recovered());
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod report;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use error::{ModelError, ModelResult};
pub use model::Model;
pub use observer::{NoopObserver, ReportObserver};
pub use report::{SeirReport, SeirTimeline};
