//! Top-level model configuration.

use crate::{EpiError, EpiResult, SimDuration, TimePoint};

/// A calendar day, resolved to local midnight when the model starts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year:  i32,
    pub month: u32,
    pub day:   u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Local midnight at the start of this day.
    pub fn midnight(self) -> EpiResult<TimePoint> {
        TimePoint::local_midnight(self.year, self.month, self.day)
    }
}

/// Model configuration.
///
/// Typically constructed in code or loaded from a JSON/TOML file by the host
/// (with the `serde` feature) and handed to `epi_model::ModelBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Seconds between SEIR snapshots.  Default: 86 400 (one day).
    pub report_interval_secs: i64,

    /// Clock origin.  `None` leaves the clock at the Unix epoch.
    pub start_date: Option<CalendarDate>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed:                 0,
            report_interval_secs: 86_400,
            start_date:           None,
        }
    }
}

impl ModelConfig {
    #[inline]
    pub fn report_interval(&self) -> SimDuration {
        SimDuration::secs(self.report_interval_secs)
    }

    /// Reject settings the run loop cannot honour.
    pub fn validate(&self) -> EpiResult<()> {
        if self.report_interval_secs <= 0 {
            return Err(EpiError::Config(format!(
                "report interval must be positive, got {} s",
                self.report_interval_secs
            )));
        }
        Ok(())
    }
}
