//! `Location` — a place where co-present persons infect each other.
//!
//! # Infection update
//!
//! A location does no work while its population is stable.  Every time the
//! set of present persons changes, and every time SEIR counts are collected,
//! [`Location::update_infections`] accounts for the interval since the last
//! update:
//!
//! 1. Δt = now − last_update.  Nothing to do when Δt is zero.
//! 2. Tick every member's disease progression to `now`.
//! 3. With N members of which I are infectious, the per-susceptible
//!    probability of exposure over the interval is
//!    `p = 1 − exp(−β · Δt · I / N)` (β per second here).
//! 4. Draw `k ~ Binomial(N, p)`, then `k` member positions uniformly with
//!    replacement.  Positions are sorted and walked once through the
//!    insertion-ordered member list; each hit calls `Person::infect`, which
//!    ignores anyone not susceptible.
//!
//! The state counts used for `p` are those *after* ticking, so a person who
//! became infectious during the interval contributes to the whole interval.
//! Draws land on all N members, so hits on non-susceptibles are wasted.
//!
//! Member arrival and departure both run the update first, so each interval
//! is charged to exactly the population that was present during it.

use log::trace;

use epi_core::{
    EpiError, EpiResult, InfectionState, LocationId, PersonId, SeirCounts, SimDuration, SimRng,
    TimePoint,
};

use crate::{MemberHandle, Membership, Person};

const SECS_PER_DAY: f64 = 86_400.0;

#[derive(Clone, Debug)]
pub struct Location {
    id:           LocationId,
    name:         String,
    /// Transmission rate in contacts per second.
    beta_per_sec: f64,
    members:      Membership,
    last_update:  TimePoint,
}

impl Location {
    /// A new empty location with transmission rate `beta` (per day).
    ///
    /// # Errors
    ///
    /// [`EpiError::InvalidBeta`] if `beta` is negative or not finite.
    pub fn new(
        id:   LocationId,
        beta: f64,
        name: impl Into<String>,
        now:  TimePoint,
    ) -> EpiResult<Self> {
        Ok(Self {
            id,
            name: name.into(),
            beta_per_sec: validate_beta(beta)? / SECS_PER_DAY,
            members: Membership::new(),
            last_update: now,
        })
    }

    #[inline]
    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transmission rate per day.
    pub fn beta(&self) -> f64 {
        self.beta_per_sec * SECS_PER_DAY
    }

    /// Replace the transmission rate (per day).
    ///
    /// Intervals not yet accounted for are charged at the new rate; callers
    /// that want the old rate to apply up to now update first.
    pub fn set_beta(&mut self, beta: f64) -> EpiResult<()> {
        self.beta_per_sec = validate_beta(beta)? / SECS_PER_DAY;
        Ok(())
    }

    #[inline]
    pub fn last_update(&self) -> TimePoint {
        self.last_update
    }

    /// Number of persons present.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Persons present, in arrival order.
    pub fn members(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.members.iter()
    }

    /// `true` if `handle` is `person`'s current membership here.
    pub(crate) fn holds(&self, handle: MemberHandle, person: PersonId) -> bool {
        self.members.get(handle) == Some(person)
    }

    /// Re-anchor the update clock without charging any interval.
    pub(crate) fn reset_clock(&mut self, t: TimePoint) {
        self.last_update = t;
    }

    // ── Population changes ────────────────────────────────────────────────────

    /// Account for the interval up to `now`, then add `person`.
    pub fn enter(
        &mut self,
        person:  PersonId,
        now:     TimePoint,
        persons: &mut [Person],
        rng:     &mut SimRng,
    ) -> MemberHandle {
        self.update_infections(now, persons, rng);
        self.members.insert(person)
    }

    /// Account for the interval up to `now`, then remove the member behind
    /// `handle`.
    ///
    /// # Panics
    ///
    /// If `handle` is not a current member of this location.  Persons and
    /// locations are only mutated through `Population`, which keeps handles
    /// consistent, so a stale handle is a bug.
    pub fn leave(
        &mut self,
        handle:  MemberHandle,
        now:     TimePoint,
        persons: &mut [Person],
        rng:     &mut SimRng,
    ) -> PersonId {
        self.update_infections(now, persons, rng);
        let Some(person) = self.members.remove(handle) else {
            panic!("{}: stale membership handle {handle:?}", self.id);
        };
        person
    }

    // ── Infection ─────────────────────────────────────────────────────────────

    /// Charge the interval `[last_update, now)` to the current members.
    ///
    /// Idempotent at a fixed `now`.  Returns the number of persons newly
    /// exposed.
    pub fn update_infections(
        &mut self,
        now:     TimePoint,
        persons: &mut [Person],
        rng:     &mut SimRng,
    ) -> u32 {
        let dt = now - self.last_update;
        if dt <= SimDuration::ZERO {
            return 0;
        }
        self.last_update = now;

        let n = self.members.len();
        if n == 0 {
            return 0;
        }

        let mut infectious = 0usize;
        for p in self.members.iter() {
            let person = &mut persons[p.index()];
            person.tick_infection(now);
            if person.state() == InfectionState::Infectious {
                infectious += 1;
            }
        }
        if infectious == 0 || self.beta_per_sec == 0.0 {
            return 0;
        }

        let exponent = -self.beta_per_sec * dt.as_secs_f64() * infectious as f64 / n as f64;
        let p = -exponent.exp_m1();
        let k = rng.binomial(n as u64, p) as usize;
        if k == 0 {
            return 0;
        }

        let mut picks: Vec<usize> = (0..k).map(|_| rng.gen_range(0..n)).collect();
        picks.sort_unstable();

        let mut newly = 0;
        let mut cursor = self.members.cursor();
        let mut pos = 0;
        for pick in picks {
            cursor.advance(pick - pos);
            pos = pick;
            if let Some(target) = cursor.get() {
                if persons[target.index()].infect(now) {
                    newly += 1;
                }
            }
        }

        trace!(
            "{} @ {now}: N={n} I={infectious} p={p:.6} drew {k}, {newly} newly exposed",
            self.id
        );
        newly
    }

    /// Bring the location up to `now` and count its members by state.
    pub fn collect_seir(
        &mut self,
        now:     TimePoint,
        persons: &mut [Person],
        rng:     &mut SimRng,
    ) -> SeirCounts {
        self.update_infections(now, persons, rng);
        // Ticking again covers the Δt = 0 case, where update_infections
        // returns before touching anyone.
        self.members
            .iter()
            .map(|p| {
                let person = &mut persons[p.index()];
                person.tick_infection(now);
                person.state()
            })
            .collect()
    }
}

fn validate_beta(beta: f64) -> EpiResult<f64> {
    if beta.is_finite() && beta >= 0.0 {
        Ok(beta)
    } else {
        Err(EpiError::InvalidBeta(beta))
    }
}
