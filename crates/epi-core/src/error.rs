//! Usage error type shared by the `epi-*` crates.
//!
//! Sub-crates define their own error enums and convert `EpiError` into them
//! via `From` impls (see `epi_model::ModelError`).  Violated internal
//! invariants are not represented here; they panic.

use thiserror::Error;

use crate::{LocationId, PersonId, TimePoint};

/// Invalid arguments passed to the public API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EpiError {
    #[error("{year:04}-{month:02}-{day:02} is not a valid local calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("start date can only be set before anything is scheduled or simulated")]
    StartDateLocked,

    #[error("infection rate must be finite and non-negative, got {0}")]
    InvalidBeta(f64),

    #[error("{what} must be non-negative, got {secs} s")]
    InvalidDuration { what: &'static str, secs: i64 },

    #[error("itinerary entry must start before it ends (start {start}, end {end})")]
    InvalidItinerary { start: TimePoint, end: TimePoint },

    #[error("person {0} not found")]
    PersonNotFound(PersonId),

    #[error("location {0} not found")]
    LocationNotFound(LocationId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for usage errors.
pub type EpiResult<T> = Result<T, EpiError>;
