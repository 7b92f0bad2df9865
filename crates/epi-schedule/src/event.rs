//! Scheduled events.
//!
//! Callbacks are a closed, copyable set of variants rather than boxed
//! closures: the model dispatches on the tag, and the schedule stores plain
//! data.

use epi_core::{EntryIdx, PersonId, TimePoint};

/// What should happen when a schedule entry fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Collect an SEIR snapshot across the whole model.
    ReportSeir,
    /// Ends the `simulate` call that reaches it; later entries stay queued.
    StopSim,
    /// `person` should move to the location of their itinerary entry `entry`.
    BeginEntry { person: PersonId, entry: EntryIdx },
    /// `person`'s itinerary entry `entry` is over.
    EndEntry { person: PersonId, entry: EntryIdx },
}

impl Event {
    /// The person this event acts on, if any.
    pub fn person(&self) -> Option<PersonId> {
        match *self {
            Event::BeginEntry { person, .. } | Event::EndEntry { person, .. } => Some(person),
            Event::ReportSeir | Event::StopSim => None,
        }
    }
}

/// A `(time, event)` pair popped from the [`Scheduler`][crate::Scheduler].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ScheduleEntry {
    pub time:  TimePoint,
    pub event: Event,
}
