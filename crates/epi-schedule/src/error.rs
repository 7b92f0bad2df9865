use epi_core::TimePoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("cannot schedule an event at {at}: the clock is already at {now}")]
    InPast { at: TimePoint, now: TimePoint },

    #[error("itinerary parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
