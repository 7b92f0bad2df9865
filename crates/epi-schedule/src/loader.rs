//! CSV itinerary loader.
//!
//! # CSV format
//!
//! One row per itinerary entry.  Times are offsets in seconds from the
//! model's start date, so the same file can drive runs that start on
//! different calendar days.
//!
//! ```csv
//! person_id,location_id,start_offset_secs,end_offset_secs
//! 0,1,3600,10800
//! 1,1,3600,10800
//! 0,2,86400,93600
//! ```
//!
//! Rows are returned in file order.  Entries for the same person keep their
//! relative order, which matters for the preemption rule when two entries
//! start at the same instant.

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use epi_core::{LocationId, PersonId, SimDuration};

use crate::ScheduleError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ItineraryRow {
    person_id:         u32,
    location_id:       u32,
    start_offset_secs: i64,
    end_offset_secs:   i64,
}

/// One parsed itinerary row.  Offsets are relative to the model start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItineraryRecord {
    pub person:       PersonId,
    pub location:     LocationId,
    pub start_offset: SimDuration,
    pub end_offset:   SimDuration,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load itinerary records from a CSV file.
pub fn load_itineraries_csv(path: &Path) -> Result<Vec<ItineraryRecord>, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_itineraries_reader(file)
}

/// Like [`load_itineraries_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded data.
pub fn load_itineraries_reader<R: Read>(reader: R) -> Result<Vec<ItineraryRecord>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (line, result) in csv_reader.deserialize::<ItineraryRow>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if row.start_offset_secs < 0 {
            // Header is line 1, so data row `line` sits on line `line + 2`.
            return Err(ScheduleError::Parse(format!(
                "line {}: negative start offset {}",
                line + 2,
                row.start_offset_secs
            )));
        }
        records.push(ItineraryRecord {
            person:       PersonId(row.person_id),
            location:     LocationId(row.location_id),
            start_offset: SimDuration::secs(row.start_offset_secs),
            end_offset:   SimDuration::secs(row.end_offset_secs),
        });
    }

    debug!("loaded {} itinerary records", records.len());
    Ok(records)
}
