//! `epi-schedule` — the discrete-event schedule and itinerary types.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`event`]      | `Event` (tagged callback variant), `ScheduleEntry`        |
//! | [`scheduler`]  | `Scheduler` (binary heap + clock), `EventHandler`, `RunStats` |
//! | [`itinerary`]  | `ItineraryEntry`, `Itinerary` (append-only)               |
//! | [`loader`]     | `load_itineraries_csv`, `load_itineraries_reader`         |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Event model (summary)
//!
//! Simulated time advances lazily: nothing happens between scheduled
//! entries.  The scheduler pops the earliest `(time, event)` pair, moves its
//! clock to that time, and hands the event to an [`EventHandler`]:
//!
//! ```text
//! while let Some(entry) = scheduler.pop_until(stop):
//!     now = entry.time
//!     handler.handle(entry, scheduler)   // may push more entries ≥ now
//! ```
//!
//! Entries with equal times fire in insertion order.

pub mod error;
pub mod event;
pub mod itinerary;
pub mod loader;
pub mod scheduler;


pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, ScheduleEntry};
pub use itinerary::{Itinerary, ItineraryEntry};
pub use loader::{ItineraryRecord, load_itineraries_csv, load_itineraries_reader};
pub use scheduler::{EventHandler, RunStats, Scheduler};
