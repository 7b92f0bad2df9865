//! Itinerary types: `ItineraryEntry` and the per-person `Itinerary`.
//!
//! # Entry semantics
//!
//! An entry says "between `start` and `end`, be at `location`".  Outside
//! that window the person goes home unless another entry is active.  When
//! entries overlap, the later-starting one preempts the earlier one; the
//! earlier entry's end is then ignored (no restoration).  The state machine
//! itself lives in `epi_population::Population`.
//!
//! # Identity
//!
//! Scheduled `BeginEntry`/`EndEntry` events refer to an entry by
//! `(PersonId, EntryIdx)`.  `Itinerary` is append-only and never relocates
//! or removes entries, so an `EntryIdx` stays valid for the lifetime of the
//! model.

use epi_core::{EntryIdx, EpiError, EpiResult, LocationId, SimDuration, TimePoint};

// ── ItineraryEntry ────────────────────────────────────────────────────────────

/// A planned visit to `location` over `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItineraryEntry {
    location: LocationId,
    start:    TimePoint,
    end:      TimePoint,
}

impl ItineraryEntry {
    /// # Errors
    ///
    /// [`EpiError::InvalidItinerary`] unless `start < end`.
    pub fn new(location: LocationId, start: TimePoint, end: TimePoint) -> EpiResult<Self> {
        if start >= end {
            return Err(EpiError::InvalidItinerary { start, end });
        }
        Ok(Self { location, start, end })
    }

    #[inline]
    pub fn location(&self) -> LocationId {
        self.location
    }

    #[inline]
    pub fn start(&self) -> TimePoint {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimePoint {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> SimDuration {
        self.end - self.start
    }

    /// `true` if `t` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, t: TimePoint) -> bool {
        self.start <= t && t < self.end
    }
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

/// Append-only list of a person's itinerary entries, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Itinerary {
    entries: Vec<ItineraryEntry>,
}

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` and return its stable index.
    pub fn push(&mut self, entry: ItineraryEntry) -> EntryIdx {
        let idx = EntryIdx(self.entries.len() as u32);
        self.entries.push(entry);
        idx
    }

    #[inline]
    pub fn get(&self, idx: EntryIdx) -> Option<&ItineraryEntry> {
        self.entries.get(idx.index())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Read-only slice of all entries (insertion order).
    pub fn entries(&self) -> &[ItineraryEntry] {
        &self.entries
    }

    /// Entries paired with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (EntryIdx, &ItineraryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (EntryIdx(i as u32), e))
    }
}
