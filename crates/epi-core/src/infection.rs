//! SEIR infection states and per-state head counts.

use std::fmt;
use std::ops::{Add, AddAssign};

/// Compartment of a single person.
///
/// Transitions are monotonic, S → E → I → R, and never skip a state.  The
/// derived `Ord` follows that progression so callers can assert
/// monotonicity with a plain comparison.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfectionState {
    #[default]
    Susceptible,
    Exposed,
    Infectious,
    Recovered,
}

impl InfectionState {
    /// All states in progression order.
    pub const ALL: [InfectionState; 4] = [
        InfectionState::Susceptible,
        InfectionState::Exposed,
        InfectionState::Infectious,
        InfectionState::Recovered,
    ];

    /// Position in the progression: S = 0, E = 1, I = 2, R = 3.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The state that follows `self`, or `None` for `Recovered`.
    pub fn next(self) -> Option<InfectionState> {
        match self {
            InfectionState::Susceptible => Some(InfectionState::Exposed),
            InfectionState::Exposed     => Some(InfectionState::Infectious),
            InfectionState::Infectious  => Some(InfectionState::Recovered),
            InfectionState::Recovered   => None,
        }
    }

    /// Single-letter compartment label, useful for CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            InfectionState::Susceptible => "S",
            InfectionState::Exposed     => "E",
            InfectionState::Infectious  => "I",
            InfectionState::Recovered   => "R",
        }
    }
}

impl fmt::Display for InfectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SeirCounts ────────────────────────────────────────────────────────────────

/// Number of persons in each compartment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeirCounts {
    pub susceptible: u32,
    pub exposed:     u32,
    pub infectious:  u32,
    pub recovered:   u32,
}

impl SeirCounts {
    /// Count one more person in `state`.
    #[inline]
    pub fn record(&mut self, state: InfectionState) {
        match state {
            InfectionState::Susceptible => self.susceptible += 1,
            InfectionState::Exposed     => self.exposed += 1,
            InfectionState::Infectious  => self.infectious += 1,
            InfectionState::Recovered   => self.recovered += 1,
        }
    }

    /// Head count for a single state.
    pub fn get(&self, state: InfectionState) -> u32 {
        match state {
            InfectionState::Susceptible => self.susceptible,
            InfectionState::Exposed     => self.exposed,
            InfectionState::Infectious  => self.infectious,
            InfectionState::Recovered   => self.recovered,
        }
    }

    pub fn total(&self) -> u32 {
        self.susceptible + self.exposed + self.infectious + self.recovered
    }
}

impl FromIterator<InfectionState> for SeirCounts {
    fn from_iter<T: IntoIterator<Item = InfectionState>>(iter: T) -> Self {
        let mut counts = SeirCounts::default();
        for state in iter {
            counts.record(state);
        }
        counts
    }
}

impl AddAssign for SeirCounts {
    fn add_assign(&mut self, rhs: SeirCounts) {
        self.susceptible += rhs.susceptible;
        self.exposed += rhs.exposed;
        self.infectious += rhs.infectious;
        self.recovered += rhs.recovered;
    }
}

impl Add for SeirCounts {
    type Output = SeirCounts;
    fn add(mut self, rhs: SeirCounts) -> SeirCounts {
        self += rhs;
        self
    }
}
