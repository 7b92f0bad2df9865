//! `epi-core` — foundational types for the epideux epidemic simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and few external ones (`chrono`, `rand`,
//! `rand_distr`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PersonId`, `LocationId`, `EntryIdx`                  |
//! | [`time`]        | `TimePoint`, `SimDuration`                            |
//! | [`infection`]   | `InfectionState`, `SeirCounts`                        |
//! | [`rng`]         | `SimRng` (the single model-wide generator)            |
//! | [`config`]      | `ModelConfig`, `CalendarDate`                         |
//! | [`error`]       | `EpiError`, `EpiResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod infection;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CalendarDate, ModelConfig};
pub use error::{EpiError, EpiResult};
pub use ids::{EntryIdx, LocationId, PersonId};
pub use infection::{InfectionState, SeirCounts};
pub use rng::SimRng;
pub use time::{SimDuration, TimePoint};
