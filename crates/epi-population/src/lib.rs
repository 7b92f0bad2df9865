//! `epi-population` — persons, locations, and how infection spreads between
//! co-present persons.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | [`membership`]   | `Membership`, `MemberHandle` — insertion-ordered member list  |
//! | [`person`]       | `Person` — disease state, itinerary, current location         |
//! | [`location`]     | `Location` — β, members, lazy infection update                |
//! | [`population`]   | `Population` — both arenas, movement, itinerary state machine |
//! | [`error`]        | `PopulationError`, `PopulationResult<T>`                      |
//!
//! Nothing here knows about the scheduler.  `epi-model` turns popped events
//! into calls on [`Population`] and passes its clock as `now`.

pub mod error;
pub mod location;
pub mod membership;
pub mod person;
pub mod population;


pub use error::{PopulationError, PopulationResult};
pub use location::Location;
pub use membership::{MemberHandle, Membership};
pub use person::Person;
pub use population::Population;
