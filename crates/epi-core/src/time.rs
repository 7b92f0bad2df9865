//! Simulation time model.
//!
//! # Design
//!
//! Time is an absolute instant, `TimePoint`, counted in whole seconds since
//! the Unix epoch.  Intervals are `SimDuration`, a signed second count.
//! Integer seconds keep all schedule arithmetic exact (no floating-point
//! drift) and make comparisons O(1); the infection model converts to `f64`
//! only at the point where a probability is computed.
//!
//! The origin of a simulation is the user-supplied start date at local
//! midnight, resolved through `chrono::Local`.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use chrono::{Local, NaiveDate, TimeZone};

use crate::{EpiError, EpiResult};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR:   i64 = 3_600;
const SECS_PER_DAY:    i64 = 86_400;

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A signed interval of simulated time with one-second resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub i64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);

    #[inline]
    pub const fn secs(secs: i64) -> Self {
        SimDuration(secs)
    }

    #[inline]
    pub const fn minutes(minutes: i64) -> Self {
        SimDuration(minutes * SECS_PER_MINUTE)
    }

    #[inline]
    pub const fn hours(hours: i64) -> Self {
        SimDuration(hours * SECS_PER_HOUR)
    }

    #[inline]
    pub const fn days(days: i64) -> Self {
        SimDuration(days * SECS_PER_DAY)
    }

    #[inline]
    pub fn as_secs(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 + rhs.0)
    }
}

impl Sub for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 - rhs.0)
    }
}

impl Mul<i64> for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn mul(self, rhs: i64) -> SimDuration {
        SimDuration(self.0 * rhs)
    }
}

impl fmt::Display for SimDuration {
    /// `[-]<days>d HH:MM:SS`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        let days = total / SECS_PER_DAY as u64;
        let hours = (total % SECS_PER_DAY as u64) / SECS_PER_HOUR as u64;
        let minutes = (total % SECS_PER_HOUR as u64) / SECS_PER_MINUTE as u64;
        let secs = total % SECS_PER_MINUTE as u64;
        write!(f, "{sign}{days}d {hours:02}:{minutes:02}:{secs:02}")
    }
}

// ── TimePoint ─────────────────────────────────────────────────────────────────

/// An absolute simulated instant: seconds since the Unix epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimePoint(pub i64);

impl TimePoint {
    /// The clock origin of a model that was never given a start date.
    pub const EPOCH: TimePoint = TimePoint(0);

    #[inline]
    pub fn from_unix_secs(secs: i64) -> Self {
        TimePoint(secs)
    }

    #[inline]
    pub fn unix_secs(self) -> i64 {
        self.0
    }

    /// Local midnight at the start of the given calendar day.
    ///
    /// If the local midnight is ambiguous (a DST fold), the earlier instant
    /// is used.  Dates that do not exist, or whose midnight is skipped by a
    /// DST gap, are rejected.
    pub fn local_midnight(year: i32, month: u32, day: u32) -> EpiResult<TimePoint> {
        let invalid = || EpiError::InvalidDate { year, month, day };
        let midnight = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?;
        let local = Local
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(invalid)?;
        Ok(TimePoint(local.timestamp()))
    }

    /// Interval elapsed from `earlier` to `self` (negative if `earlier` is
    /// actually later).
    #[inline]
    pub fn since(self, earlier: TimePoint) -> SimDuration {
        SimDuration(self.0 - earlier.0)
    }

    /// `self + d`, or `None` if the result leaves the `i64` range.
    #[inline]
    pub fn checked_add(self, d: SimDuration) -> Option<TimePoint> {
        self.0.checked_add(d.0).map(TimePoint)
    }
}

impl Add<SimDuration> for TimePoint {
    type Output = TimePoint;
    #[inline]
    fn add(self, rhs: SimDuration) -> TimePoint {
        TimePoint(self.0 + rhs.0)
    }
}

impl AddAssign<SimDuration> for TimePoint {
    #[inline]
    fn add_assign(&mut self, rhs: SimDuration) {
        self.0 += rhs.0;
    }
}

impl Sub<SimDuration> for TimePoint {
    type Output = TimePoint;
    #[inline]
    fn sub(self, rhs: SimDuration) -> TimePoint {
        TimePoint(self.0 - rhs.0)
    }
}

impl SubAssign<SimDuration> for TimePoint {
    #[inline]
    fn sub_assign(&mut self, rhs: SimDuration) {
        self.0 -= rhs.0;
    }
}

impl Sub for TimePoint {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: TimePoint) -> SimDuration {
        self.since(rhs)
    }
}

impl fmt::Display for TimePoint {
    /// Local date-time, e.g. `2020-04-01 06:00:00`.  Falls back to the raw
    /// second count for instants chrono cannot represent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Local.timestamp_opt(self.0, 0).earliest() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "t={}s", self.0),
        }
    }
}
