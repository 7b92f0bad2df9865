//! move-location — ten persons visit a second location and come back.
//!
//! Itineraries come from an embedded CSV, offsets counted from the start
//! date.

use std::io::Cursor;

use anyhow::Result;
use log::{LevelFilter, debug};

use epi_core::{LocationId, ModelConfig, SimDuration};
use epi_demos::init_console_logger;
use epi_model::{Model, ModelBuilder};
use epi_schedule::load_itineraries_reader;

const PERSONS: usize = 10;

// Everyone spends 01:00–03:00 at location 1.
const ITINERARY_CSV: &str = "\
person_id,location_id,start_offset_secs,end_offset_secs\n\
0,1,3600,10800\n\
1,1,3600,10800\n\
2,1,3600,10800\n\
3,1,3600,10800\n\
4,1,3600,10800\n\
5,1,3600,10800\n\
6,1,3600,10800\n\
7,1,3600,10800\n\
8,1,3600,10800\n\
9,1,3600,10800\n\
";

fn populations(model: &Model, a: LocationId, b: LocationId) -> Result<(usize, usize)> {
    Ok((model.location(a)?.len(), model.location(b)?.len()))
}

fn main() -> Result<()> {
    init_console_logger(LevelFilter::Debug)?;

    let mut model = ModelBuilder::new(ModelConfig::default())
        .start_date(2020, 4, 1)
        .build()?;
    let l1 = model.create_location(0.7, "Location 1")?;
    let l2 = model.create_location(0.7, "Location 2")?;
    for _ in 0..PERSONS {
        model.create_person(l1, SimDuration::days(1), SimDuration::days(1))?;
    }

    let records = load_itineraries_reader(Cursor::new(ITINERARY_CSV))?;
    model.add_itineraries(&records)?;

    let steps = [
        ("before simulation", SimDuration::ZERO),
        ("after 2h", SimDuration::hours(2)),
        ("after 4h", SimDuration::hours(2)),
        ("after 24h", SimDuration::hours(20)),
    ];
    for (label, step) in steps {
        if !step.is_zero() {
            model.simulate(step)?;
        }
        let (n1, n2) = populations(&model, l1, l2)?;
        debug!("[simtime: {}] {label}", model.current_time());
        println!("{label:<18} Location 1: {n1:>2}  Location 2: {n2:>2}");
    }
    model.check_invariants()?;
    Ok(())
}
