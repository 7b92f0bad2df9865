//! Plain data row types written by output backends.

use epi_model::SeirReport;

/// One SEIR snapshot, flattened for tabular output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeirRow {
    pub unix_time_secs: i64,
    pub susceptible:    u32,
    pub exposed:        u32,
    pub infectious:     u32,
    pub recovered:      u32,
}

impl SeirRow {
    pub const HEADER: [&'static str; 5] =
        ["unix_time_secs", "susceptible", "exposed", "infectious", "recovered"];

    /// Field values in `HEADER` order.
    pub fn fields(&self) -> [String; 5] {
        [
            self.unix_time_secs.to_string(),
            self.susceptible.to_string(),
            self.exposed.to_string(),
            self.infectious.to_string(),
            self.recovered.to_string(),
        ]
    }
}

impl From<&SeirReport> for SeirRow {
    fn from(r: &SeirReport) -> Self {
        Self {
            unix_time_secs: r.time.unix_secs(),
            susceptible:    r.susceptible,
            exposed:        r.exposed,
            infectious:     r.infectious,
            recovered:      r.recovered,
        }
    }
}
