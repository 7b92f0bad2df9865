//! The `Model` struct and its discrete-event run loop.

use std::ops::ControlFlow;

use log::{debug, warn};

use epi_core::{
    EntryIdx, EpiError, LocationId, ModelConfig, PersonId, SeirCounts, SimDuration, SimRng,
    TimePoint,
};
use epi_population::{Location, Person, Population};
use epi_schedule::{
    Event, EventHandler, ItineraryEntry, ItineraryRecord, ScheduleEntry, ScheduleError, Scheduler,
};

use crate::{
    ModelError, ModelResult, NoopObserver, ReportObserver, SeirReport, SeirTimeline,
};

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything events act on.  Kept apart from the scheduler so the run loop
/// can borrow both at once.
struct World {
    population: Population,
    rng:        SimRng,
    timeline:   SeirTimeline,
}

impl World {
    /// Bring every location up to `now`, count, and append to the timeline.
    fn report<O: ReportObserver>(&mut self, now: TimePoint, observer: &mut O) {
        if self.timeline.last().is_some_and(|last| last.time >= now) {
            debug!("[simtime: {now}] snapshot already taken, skipping");
            return;
        }
        let counts = self.population.collect_seir(now, &mut self.rng);
        let report = SeirReport::new(now, counts);
        debug!(
            "[simtime: {now}] S={} E={} I={} R={}",
            report.susceptible, report.exposed, report.infectious, report.recovered
        );
        self.timeline.push(report);
        observer.on_report(&report);
    }
}

/// Routes popped events to the world for one `simulate` call.
struct Dispatcher<'a, O: ReportObserver> {
    world:    &'a mut World,
    observer: &'a mut O,
}

impl<O: ReportObserver> EventHandler for Dispatcher<'_, O> {
    type Error = ModelError;

    fn handle(
        &mut self,
        entry:      ScheduleEntry,
        _scheduler: &mut Scheduler,
    ) -> ModelResult<ControlFlow<()>> {
        let now = entry.time;
        let world = &mut *self.world;
        match entry.event {
            Event::ReportSeir => world.report(now, self.observer),
            Event::StopSim => {
                debug!("[simtime: {now}] stop requested");
                return Ok(ControlFlow::Break(()));
            }
            Event::BeginEntry { person, entry } => {
                world.population.begin_entry(person, entry, now, &mut world.rng)?;
            }
            Event::EndEntry { person, entry } => {
                world.population.end_entry(person, entry, now, &mut world.rng)?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// `base + d`, rejecting results the clock cannot represent.
fn offset_from(base: TimePoint, d: SimDuration, what: &'static str) -> ModelResult<TimePoint> {
    base.checked_add(d)
        .ok_or_else(|| EpiError::InvalidDuration { what, secs: d.as_secs() }.into())
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// An agent-based SEIR epidemic model.
///
/// Owns the person and location arenas, the event schedule (and with it the
/// clock), the single RNG, and the SEIR timeline.  Persons move between
/// locations by itinerary; infection spreads lazily inside each location
/// whenever its population changes or a snapshot is taken.
///
/// Create with [`Model::new`] or [`ModelBuilder`][crate::ModelBuilder].
pub struct Model {
    config:         ModelConfig,
    origin:         TimePoint,
    scheduler:      Scheduler,
    world:          World,
    /// Next grid point `origin + k·interval` not yet scheduled for a report.
    next_report_at: TimePoint,
    has_run:        bool,
}

impl Model {
    /// A model with default settings, seeded with `seed`, clock at the epoch.
    pub fn new(seed: u64) -> Self {
        Self::with_origin(ModelConfig { seed, ..ModelConfig::default() }, TimePoint::EPOCH)
    }

    /// Assemble a model whose config has already been validated.
    pub(crate) fn with_origin(config: ModelConfig, origin: TimePoint) -> Self {
        Self {
            scheduler: Scheduler::new(origin),
            world: World {
                population: Population::new(),
                rng:        SimRng::new(config.seed),
                timeline:   SeirTimeline::new(),
            },
            next_report_at: origin,
            has_run: false,
            origin,
            config,
        }
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Move the clock origin to local midnight of `year-month-day`.
    ///
    /// Only allowed before anything is scheduled, infected, or simulated.
    /// Existing locations are re-anchored at the new origin.
    pub fn set_start_date(&mut self, year: i32, month: u32, day: u32) -> ModelResult<()> {
        let any_infected = self.persons().iter().any(|p| p.infected_at().is_some());
        if self.has_run || any_infected || !self.scheduler.is_empty() {
            return Err(EpiError::StartDateLocked.into());
        }
        let origin = TimePoint::local_midnight(year, month, day)?;
        self.scheduler.reset_origin(origin);
        self.world.population.reset_clocks(origin);
        self.origin = origin;
        self.next_report_at = origin;
        debug!("start date set to {origin}");
        Ok(())
    }

    #[inline]
    pub fn current_time(&self) -> TimePoint {
        self.scheduler.now()
    }

    /// The clock origin (start date midnight, or the epoch).
    #[inline]
    pub fn start_time(&self) -> TimePoint {
        self.origin
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a location with transmission rate `beta` per day.
    pub fn create_location(&mut self, beta: f64, name: &str) -> ModelResult<LocationId> {
        let now = self.current_time();
        Ok(self.world.population.create_location(beta, name, now)?)
    }

    /// Add a susceptible person with incubation period `incubation` and
    /// infectious period `disease`, placed at `home` immediately.
    pub fn create_person(
        &mut self,
        home:       LocationId,
        incubation: SimDuration,
        disease:    SimDuration,
    ) -> ModelResult<PersonId> {
        let now = self.current_time();
        let World { population, rng, .. } = &mut self.world;
        Ok(population.create_person(home, incubation, disease, now, rng)?)
    }

    /// Expose `person` at the current time.  Returns `false` if the person
    /// was not susceptible.
    pub fn infect(&mut self, person: PersonId) -> ModelResult<bool> {
        let now = self.current_time();
        let World { population, rng, .. } = &mut self.world;
        Ok(population.infect(person, now, rng)?)
    }

    /// Change a location's transmission rate from now on.
    pub fn set_location_beta(&mut self, location: LocationId, beta: f64) -> ModelResult<()> {
        let now = self.current_time();
        let World { population, rng, .. } = &mut self.world;
        Ok(population.set_beta(location, beta, now, rng)?)
    }

    // ── Itineraries ───────────────────────────────────────────────────────

    /// Append `entry` to `person`'s itinerary and schedule its begin and end.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InPast`] if the entry starts before the clock.
    /// - [`EpiError::PersonNotFound`] / [`EpiError::LocationNotFound`].
    pub fn add_itinerary_entry(
        &mut self,
        person: PersonId,
        entry:  ItineraryEntry,
    ) -> ModelResult<EntryIdx> {
        let now = self.current_time();
        if entry.start() < now {
            warn!("[simtime: {now}] rejected itinerary entry for {person} starting {}", entry.start());
            return Err(ScheduleError::InPast { at: entry.start(), now }.into());
        }
        let idx = self.world.population.add_itinerary_entry(person, entry)?;
        self.scheduler.push(entry.start(), Event::BeginEntry { person, entry: idx })?;
        self.scheduler.push(entry.end(), Event::EndEntry { person, entry: idx })?;
        Ok(idx)
    }

    /// Convenience for `add_itinerary_entry` with times given directly.
    pub fn add_visit(
        &mut self,
        person:   PersonId,
        location: LocationId,
        start:    TimePoint,
        end:      TimePoint,
    ) -> ModelResult<EntryIdx> {
        self.add_itinerary_entry(person, ItineraryEntry::new(location, start, end)?)
    }

    /// Add loaded itinerary records, whose offsets count from the start date.
    ///
    /// Stops at the first invalid record; records before it stay added.
    /// Returns the number of entries added.
    pub fn add_itineraries(&mut self, records: &[ItineraryRecord]) -> ModelResult<usize> {
        for r in records {
            let start = offset_from(self.origin, r.start_offset, "itinerary start offset")?;
            let end = offset_from(self.origin, r.end_offset, "itinerary end offset")?;
            let entry = ItineraryEntry::new(r.location, start, end)?;
            self.add_itinerary_entry(r.person, entry)?;
        }
        debug!("added {} itinerary entries", records.len());
        Ok(records.len())
    }

    /// Push a raw event onto the schedule.
    ///
    /// Entry events must name an existing itinerary entry.  `StopSim` ends
    /// the run that reaches it early, leaving the clock at its time.
    pub fn schedule(&mut self, at: TimePoint, event: Event) -> ModelResult<()> {
        if let Event::BeginEntry { person, entry } | Event::EndEntry { person, entry } = event {
            let known = self.world.population.person(person)?.itinerary().get(entry).is_some();
            if !known {
                return Err(ModelError::UnknownEntry { person, entry });
            }
        }
        self.scheduler.push(at, event).inspect_err(|e| match event.person() {
            Some(person) => warn!("rejected {event:?} for {person}: {e}"),
            None => warn!("rejected {event:?}: {e}"),
        })?;
        Ok(())
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Advance the model by `duration`.  See [`Model::simulate_with`].
    pub fn simulate(&mut self, duration: SimDuration) -> ModelResult<()> {
        self.simulate_with(duration, &mut NoopObserver)
    }

    /// Advance the model by `duration`, reporting to `observer`.
    ///
    /// 1. Schedule a snapshot at every report grid point
    ///    (`start + k·interval`) in `[now, now + duration]` not yet scheduled.
    /// 2. Fire queued events in time order up to and including the stop time.
    /// 3. Leave the clock on the stop time, or on the `StopSim` event that
    ///    ended the run early.
    ///
    /// Events queued beyond the stop time stay queued for the next call.
    pub fn simulate_with<O: ReportObserver>(
        &mut self,
        duration: SimDuration,
        observer: &mut O,
    ) -> ModelResult<()> {
        if duration.is_negative() {
            return Err(EpiError::InvalidDuration {
                what: "simulation duration",
                secs: duration.as_secs(),
            }
            .into());
        }
        let start = self.current_time();
        let stop = offset_from(start, duration, "simulation duration")?;
        self.schedule_reports(stop)?;
        self.has_run = true;

        debug!("[simtime: {start}] simulating {duration} until {stop}");
        observer.on_sim_start(start, stop);

        let mut dispatcher = Dispatcher { world: &mut self.world, observer: &mut *observer };
        let stats = self.scheduler.run_until(stop, &mut dispatcher)?;
        if !stats.broke {
            self.scheduler.advance_to(stop);
        }

        let now = self.current_time();
        debug!("[simtime: {now}] simulation stopped after {} events", stats.handled);
        observer.on_sim_end(now);

        #[cfg(debug_assertions)]
        if let Err(e) = self.check_invariants() {
            panic!("{e}");
        }
        Ok(())
    }

    fn schedule_reports(&mut self, stop: TimePoint) -> ModelResult<()> {
        let interval = self.config.report_interval();
        let now = self.current_time();
        if self.next_report_at < now {
            let behind = (now - self.next_report_at).as_secs();
            let steps = (behind + interval.as_secs() - 1) / interval.as_secs();
            self.next_report_at += interval * steps;
        }
        while self.next_report_at <= stop {
            self.scheduler.push(self.next_report_at, Event::ReportSeir)?;
            match self.next_report_at.checked_add(interval) {
                Some(next) => self.next_report_at = next,
                // Grid runs off the end of time; a repeat push is deduplicated.
                None => break,
            }
        }
        Ok(())
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn person(&self, id: PersonId) -> ModelResult<&Person> {
        Ok(self.world.population.person(id)?)
    }

    pub fn location(&self, id: LocationId) -> ModelResult<&Location> {
        Ok(self.world.population.location(id)?)
    }

    pub fn persons(&self) -> &[Person] {
        self.world.population.persons()
    }

    pub fn locations(&self) -> &[Location] {
        self.world.population.locations()
    }

    pub fn person_count(&self) -> usize {
        self.world.population.person_count()
    }

    pub fn location_count(&self) -> usize {
        self.world.population.location_count()
    }

    pub fn population(&self) -> &Population {
        &self.world.population
    }

    /// Counts by each person's last-ticked state.  Does not advance
    /// anything, so persons may lag the clock; see [`Model::snapshot`].
    pub fn population_counts(&self) -> SeirCounts {
        self.world.population.state_counts()
    }

    /// Bring every location up to the clock and count, without appending to
    /// the timeline.
    pub fn snapshot(&mut self) -> SeirReport {
        let now = self.current_time();
        let World { population, rng, .. } = &mut self.world;
        SeirReport::new(now, population.collect_seir(now, rng))
    }

    /// Bring one location up to the clock and count its members.
    pub fn location_report(&mut self, location: LocationId) -> ModelResult<SeirCounts> {
        let now = self.current_time();
        let World { population, rng, .. } = &mut self.world;
        Ok(population.collect_location_seir(location, now, rng)?)
    }

    /// The latest snapshot, or an all-zero report at the start time if none
    /// has been taken.
    pub fn get_report(&self) -> SeirReport {
        self.world
            .timeline
            .last()
            .copied()
            .unwrap_or_else(|| SeirReport::empty(self.origin))
    }

    pub fn get_daily_reports(&self) -> &SeirTimeline {
        &self.world.timeline
    }

    /// The model's single RNG.  Host-side draws must go through it to keep
    /// runs reproducible.
    pub fn random_generator(&mut self) -> &mut SimRng {
        &mut self.world.rng
    }

    /// Verify conservation and single residence.
    pub fn check_invariants(&self) -> ModelResult<()> {
        self.world.population.check_invariants()?;
        Ok(())
    }
}
