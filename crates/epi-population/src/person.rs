//! `Person` — one agent: disease progression plus itinerary bookkeeping.
//!
//! # Disease progression
//!
//! ```text
//! Susceptible ──infect(t)──▶ Exposed ──t > t_inf+τ_e──▶ Infectious ──t > t_inf+τ_e+τ_i──▶ Recovered
//! ```
//!
//! Transitions out of `Exposed` and `Infectious` are lazy: they happen only
//! when [`Person::tick_infection`] is called, which the owning location does
//! at every population change and SEIR collection.  Both thresholds are
//! strict, so with `τ = 0` a person still spends one instant in each state.
//!
//! A person is always a member of exactly one location.  Location changes go
//! through `Population`, which keeps `current_location` and the membership
//! handle in step with the location's list.

use epi_core::{EntryIdx, InfectionState, LocationId, PersonId, SimDuration, TimePoint};
use epi_schedule::{Itinerary, ItineraryEntry};

use crate::MemberHandle;

#[derive(Clone, Debug)]
pub struct Person {
    id:               PersonId,
    home:             LocationId,
    incubation:       SimDuration,
    disease:          SimDuration,
    state:            InfectionState,
    infected_at:      Option<TimePoint>,
    itinerary:        Itinerary,
    active_entry:     Option<EntryIdx>,
    current_location: LocationId,
    membership:       MemberHandle,
}

impl Person {
    pub(crate) fn new(
        id:         PersonId,
        home:       LocationId,
        incubation: SimDuration,
        disease:    SimDuration,
        membership: MemberHandle,
    ) -> Self {
        Self {
            id,
            home,
            incubation,
            disease,
            state: InfectionState::Susceptible,
            infected_at: None,
            itinerary: Itinerary::new(),
            active_entry: None,
            current_location: home,
            membership,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> PersonId {
        self.id
    }

    #[inline]
    pub fn home(&self) -> LocationId {
        self.home
    }

    #[inline]
    pub fn current_location(&self) -> LocationId {
        self.current_location
    }

    /// State as of the last tick.  May lag the clock until the person's
    /// location is next updated.
    #[inline]
    pub fn state(&self) -> InfectionState {
        self.state
    }

    #[inline]
    pub fn infected_at(&self) -> Option<TimePoint> {
        self.infected_at
    }

    /// Incubation period τ_e.
    #[inline]
    pub fn incubation(&self) -> SimDuration {
        self.incubation
    }

    /// Infectious period τ_i.
    #[inline]
    pub fn disease(&self) -> SimDuration {
        self.disease
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// The entry whose location the person currently occupies, if any.
    #[inline]
    pub fn active_entry(&self) -> Option<EntryIdx> {
        self.active_entry
    }

    pub(crate) fn membership(&self) -> MemberHandle {
        self.membership
    }

    // ── Disease ───────────────────────────────────────────────────────────────

    /// Expose a susceptible person at `now`.
    ///
    /// Returns `true` if the person was susceptible; any other state is left
    /// untouched.
    pub fn infect(&mut self, now: TimePoint) -> bool {
        if self.state != InfectionState::Susceptible {
            return false;
        }
        self.state = InfectionState::Exposed;
        self.infected_at = Some(now);
        true
    }

    /// Apply every progression due at `now`.  Both steps may fire in one call.
    ///
    /// Returns `true` if the state changed.
    pub fn tick_infection(&mut self, now: TimePoint) -> bool {
        let Some(t_inf) = self.infected_at else {
            return false;
        };
        let before = self.state;
        let infectious_at = t_inf + self.incubation;
        if self.state == InfectionState::Exposed && now > infectious_at {
            self.state = InfectionState::Infectious;
        }
        if self.state == InfectionState::Infectious && now > infectious_at + self.disease {
            self.state = InfectionState::Recovered;
        }
        self.state != before
    }

    // ── Itinerary bookkeeping ─────────────────────────────────────────────────

    pub(crate) fn push_entry(&mut self, entry: ItineraryEntry) -> EntryIdx {
        self.itinerary.push(entry)
    }

    pub(crate) fn set_active_entry(&mut self, entry: Option<EntryIdx>) {
        self.active_entry = entry;
    }

    pub(crate) fn relocate(&mut self, location: LocationId, membership: MemberHandle) {
        self.current_location = location;
        self.membership = membership;
    }
}
