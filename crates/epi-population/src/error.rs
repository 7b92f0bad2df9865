use epi_core::{EntryIdx, EpiError, LocationId, PersonId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopulationError {
    #[error(transparent)]
    Epi(#[from] EpiError),

    #[error("{person} has no itinerary entry {entry}")]
    UnknownEntry { person: PersonId, entry: EntryIdx },

    #[error("locations hold {members} members but {persons} persons exist")]
    Conservation { members: usize, persons: usize },

    #[error("{person} records {location} as its location but is not a member there")]
    Residence { person: PersonId, location: LocationId },
}

pub type PopulationResult<T> = Result<T, PopulationError>;
