//! `Population` — the person and location arenas plus every operation that
//! touches both.
//!
//! Persons and locations reference each other only by id.  Everything that
//! changes where a person is goes through here, so a person's
//! `current_location` and its membership handle always agree with the
//! location's member list.
//!
//! # Itinerary state machine
//!
//! | Event              | Condition                 | Effect                                   |
//! |--------------------|---------------------------|------------------------------------------|
//! | `BeginEntry(p, e)` | always                    | move `p` to `e.location`; active = `e`   |
//! | `EndEntry(p, e)`   | active == `e`             | move `p` home; active = none             |
//! | `EndEntry(p, e)`   | otherwise                 | ignored (entry was preempted)            |

use log::debug;

use epi_core::{
    EntryIdx, EpiError, InfectionState, LocationId, PersonId, SeirCounts, SimDuration, SimRng,
    TimePoint,
};
use epi_schedule::ItineraryEntry;

use crate::{Location, Person, PopulationError, PopulationResult};

#[derive(Clone, Debug, Default)]
pub struct Population {
    persons:   Vec<Person>,
    locations: Vec<Location>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Creation ──────────────────────────────────────────────────────────────

    /// Register a location with transmission rate `beta` (per day).
    pub fn create_location(
        &mut self,
        beta: f64,
        name: impl Into<String>,
        now:  TimePoint,
    ) -> PopulationResult<LocationId> {
        let id = LocationId::try_from(self.locations.len())
            .map_err(|_| EpiError::Config("location id space exhausted".into()))?;
        self.locations.push(Location::new(id, beta, name, now)?);
        Ok(id)
    }

    /// Create a susceptible person placed at `home`.
    ///
    /// Entering `home` first charges the interval since the location's last
    /// update to its existing members.
    pub fn create_person(
        &mut self,
        home:       LocationId,
        incubation: SimDuration,
        disease:    SimDuration,
        now:        TimePoint,
        rng:        &mut SimRng,
    ) -> PopulationResult<PersonId> {
        check_duration("incubation period", incubation)?;
        check_duration("infectious period", disease)?;
        if home.index() >= self.locations.len() {
            return Err(EpiError::LocationNotFound(home).into());
        }
        let id = PersonId::try_from(self.persons.len())
            .map_err(|_| EpiError::Config("person id space exhausted".into()))?;

        let handle = self.locations[home.index()].enter(id, now, &mut self.persons, rng);
        self.persons.push(Person::new(id, home, incubation, disease, handle));
        Ok(id)
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    pub fn person(&self, id: PersonId) -> PopulationResult<&Person> {
        self.persons
            .get(id.index())
            .ok_or(PopulationError::Epi(EpiError::PersonNotFound(id)))
    }

    pub fn location(&self, id: LocationId) -> PopulationResult<&Location> {
        self.locations
            .get(id.index())
            .ok_or(PopulationError::Epi(EpiError::LocationNotFound(id)))
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    // ── Disease ───────────────────────────────────────────────────────────────

    /// Expose `person` at `now`.  The person's location is brought up to date
    /// first so the new exposure does not leak into earlier intervals.
    ///
    /// Returns `true` if the person was susceptible.
    pub fn infect(
        &mut self,
        person: PersonId,
        now:    TimePoint,
        rng:    &mut SimRng,
    ) -> PopulationResult<bool> {
        let at = self.person(person)?.current_location();
        self.locations[at.index()].update_infections(now, &mut self.persons, rng);
        Ok(self.persons[person.index()].infect(now))
    }

    /// Set a location's transmission rate.  The interval up to `now` is
    /// charged at the old rate.
    pub fn set_beta(
        &mut self,
        location: LocationId,
        beta:     f64,
        now:      TimePoint,
        rng:      &mut SimRng,
    ) -> PopulationResult<()> {
        self.location(location)?;
        let loc = &mut self.locations[location.index()];
        loc.update_infections(now, &mut self.persons, rng);
        loc.set_beta(beta)?;
        Ok(())
    }

    /// Update every location to `now` and count all persons by state.
    pub fn collect_seir(&mut self, now: TimePoint, rng: &mut SimRng) -> SeirCounts {
        let mut totals = SeirCounts::default();
        for loc in &mut self.locations {
            totals += loc.collect_seir(now, &mut self.persons, rng);
        }
        totals
    }

    /// Update one location to `now` and count its members by state.
    pub fn collect_location_seir(
        &mut self,
        location: LocationId,
        now:      TimePoint,
        rng:      &mut SimRng,
    ) -> PopulationResult<SeirCounts> {
        self.location(location)?;
        Ok(self.locations[location.index()].collect_seir(now, &mut self.persons, rng))
    }

    /// Count persons by their last-ticked state without advancing anything.
    pub fn state_counts(&self) -> SeirCounts {
        self.persons.iter().map(Person::state).collect()
    }

    /// Persons currently in `state`, as of their last tick.
    pub fn in_state(&self, state: InfectionState) -> impl Iterator<Item = PersonId> + '_ {
        self.persons
            .iter()
            .filter(move |p| p.state() == state)
            .map(Person::id)
    }

    /// Re-anchor every location's update clock at `t` without charging any
    /// interval.
    pub fn reset_clocks(&mut self, t: TimePoint) {
        for loc in &mut self.locations {
            loc.reset_clock(t);
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────────

    /// Append `entry` to `person`'s itinerary.
    pub fn add_itinerary_entry(
        &mut self,
        person: PersonId,
        entry:  ItineraryEntry,
    ) -> PopulationResult<EntryIdx> {
        self.location(entry.location())?;
        self.person(person)?;
        Ok(self.persons[person.index()].push_entry(entry))
    }

    /// Move `person` from its current location to `to`.  Both locations are
    /// updated to `now` before the membership changes.
    pub fn move_person(
        &mut self,
        person: PersonId,
        to:     LocationId,
        now:    TimePoint,
        rng:    &mut SimRng,
    ) -> PopulationResult<()> {
        self.location(to)?;
        let (from, handle) = {
            let p = self.person(person)?;
            (p.current_location(), p.membership())
        };

        let left = self.locations[from.index()].leave(handle, now, &mut self.persons, rng);
        debug_assert_eq!(left, person);
        let handle = self.locations[to.index()].enter(person, now, &mut self.persons, rng);
        self.persons[person.index()].relocate(to, handle);
        Ok(())
    }

    /// Handle `BeginEntry(person, entry)`: move to the entry's location and
    /// make it the active entry, preempting any other.
    pub fn begin_entry(
        &mut self,
        person: PersonId,
        entry:  EntryIdx,
        now:    TimePoint,
        rng:    &mut SimRng,
    ) -> PopulationResult<()> {
        let target = self.entry(person, entry)?.location();
        if let Some(prev) = self.persons[person.index()].active_entry() {
            debug!("{person}: entry {entry} preempts {prev}");
        }
        self.move_person(person, target, now, rng)?;
        self.persons[person.index()].set_active_entry(Some(entry));
        Ok(())
    }

    /// Handle `EndEntry(person, entry)`.
    ///
    /// Returns `false` without doing anything if `entry` is no longer active.
    pub fn end_entry(
        &mut self,
        person: PersonId,
        entry:  EntryIdx,
        now:    TimePoint,
        rng:    &mut SimRng,
    ) -> PopulationResult<bool> {
        self.entry(person, entry)?;
        let p = &self.persons[person.index()];
        if p.active_entry() != Some(entry) {
            return Ok(false);
        }
        let home = p.home();
        self.move_person(person, home, now, rng)?;
        self.persons[person.index()].set_active_entry(None);
        Ok(true)
    }

    fn entry(&self, person: PersonId, entry: EntryIdx) -> PopulationResult<ItineraryEntry> {
        self.person(person)?
            .itinerary()
            .get(entry)
            .copied()
            .ok_or(PopulationError::UnknownEntry { person, entry })
    }

    // ── Consistency ───────────────────────────────────────────────────────────

    /// Every person is a member of exactly the location it records, and the
    /// member lists hold nobody else.
    pub fn check_invariants(&self) -> PopulationResult<()> {
        let members: usize = self.locations.iter().map(Location::len).sum();
        if members != self.persons.len() {
            return Err(PopulationError::Conservation { members, persons: self.persons.len() });
        }
        for p in &self.persons {
            let location = p.current_location();
            let held = self
                .locations
                .get(location.index())
                .is_some_and(|loc| loc.holds(p.membership(), p.id()));
            if !held {
                return Err(PopulationError::Residence { person: p.id(), location });
            }
        }
        Ok(())
    }
}

fn check_duration(what: &'static str, d: SimDuration) -> Result<(), EpiError> {
    if d.is_negative() {
        return Err(EpiError::InvalidDuration { what, secs: d.as_secs() });
    }
    Ok(())
}
