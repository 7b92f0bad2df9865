use epi_core::{EntryIdx, EpiError, PersonId};
use epi_population::PopulationError;
use epi_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Usage(#[from] EpiError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("{person} has no itinerary entry {entry}")]
    UnknownEntry { person: PersonId, entry: EntryIdx },

    #[error("model invariant violated: {0}")]
    Invariant(String),
}

impl From<PopulationError> for ModelError {
    fn from(e: PopulationError) -> Self {
        match e {
            PopulationError::Epi(e) => ModelError::Usage(e),
            PopulationError::UnknownEntry { person, entry } => {
                ModelError::UnknownEntry { person, entry }
            }
            other => ModelError::Invariant(other.to_string()),
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
