//! SEIR snapshots and the timeline they accumulate into.

use epi_core::{InfectionState, SeirCounts, TimePoint};

/// Model-wide SEIR totals at one instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeirReport {
    pub time:        TimePoint,
    pub susceptible: u32,
    pub exposed:     u32,
    pub infectious:  u32,
    pub recovered:   u32,
}

impl SeirReport {
    pub fn new(time: TimePoint, counts: SeirCounts) -> Self {
        Self {
            time,
            susceptible: counts.susceptible,
            exposed:     counts.exposed,
            infectious:  counts.infectious,
            recovered:   counts.recovered,
        }
    }

    /// All-zero report at `time`.
    pub fn empty(time: TimePoint) -> Self {
        Self::new(time, SeirCounts::default())
    }

    pub fn counts(&self) -> SeirCounts {
        SeirCounts {
            susceptible: self.susceptible,
            exposed:     self.exposed,
            infectious:  self.infectious,
            recovered:   self.recovered,
        }
    }

    pub fn get(&self, state: InfectionState) -> u32 {
        self.counts().get(state)
    }

    pub fn total(&self) -> u32 {
        self.counts().total()
    }
}

/// Every snapshot taken so far, in time order.
///
/// Column accessors return one value per snapshot, ready for plotting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeirTimeline {
    reports: Vec<SeirReport>,
}

impl SeirTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `report`.  Its time must be strictly later than the last one.
    pub(crate) fn push(&mut self, report: SeirReport) {
        debug_assert!(
            self.last().is_none_or(|last| last.time < report.time),
            "timeline times must strictly increase"
        );
        self.reports.push(report);
    }

    pub fn last(&self) -> Option<&SeirReport> {
        self.reports.last()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn as_slice(&self) -> &[SeirReport] {
        &self.reports
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeirReport> {
        self.reports.iter()
    }

    pub fn times(&self) -> Vec<TimePoint> {
        self.reports.iter().map(|r| r.time).collect()
    }

    pub fn susceptible(&self) -> Vec<u32> {
        self.column(InfectionState::Susceptible)
    }

    pub fn exposed(&self) -> Vec<u32> {
        self.column(InfectionState::Exposed)
    }

    pub fn infectious(&self) -> Vec<u32> {
        self.column(InfectionState::Infectious)
    }

    pub fn recovered(&self) -> Vec<u32> {
        self.column(InfectionState::Recovered)
    }

    /// Snapshot with the largest `exposed + infectious`, earliest on ties.
    pub fn peak_active(&self) -> Option<&SeirReport> {
        self.reports
            .iter()
            .rev()
            .max_by_key(|r| r.exposed + r.infectious)
    }

    fn column(&self, state: InfectionState) -> Vec<u32> {
        self.reports.iter().map(|r| r.get(state)).collect()
    }
}

impl<'a> IntoIterator for &'a SeirTimeline {
    type Item = &'a SeirReport;
    type IntoIter = std::slice::Iter<'a, SeirReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}
