//! single-home — one household, one seeded infection.
//!
//! Usage: `single-home [persons] [beta] [days]`

use std::time::Instant;

use anyhow::Result;
use log::{LevelFilter, info};

use epi_core::{ModelConfig, PersonId, SimDuration};
use epi_demos::{arg_or, init_console_logger, print_timeline};
use epi_model::ModelBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64         = 42;
const INCUBATION:      SimDuration = SimDuration::days(4);
const INFECTIOUS:      SimDuration = SimDuration::days(5);

fn main() -> Result<()> {
    init_console_logger(LevelFilter::Info)?;
    let persons: usize = arg_or(1, "persons", 10_000)?;
    let beta:    f64   = arg_or(2, "beta", 0.7)?;
    let days:    i64   = arg_or(3, "days", 60)?;

    println!("=== single-home — epideux ===");
    println!("Persons: {persons}  |  β: {beta}/day  |  Days: {days}  |  Seed: {SEED}");
    println!();

    let mut model = ModelBuilder::new(ModelConfig::default())
        .seed(SEED)
        .start_date(2020, 4, 1)
        .build()?;

    let home = model.create_location(beta, "home")?;
    for _ in 0..persons {
        model.create_person(home, INCUBATION, INFECTIOUS)?;
    }
    model.infect(PersonId(0))?;

    let t0 = Instant::now();
    model.simulate(SimDuration::days(days))?;
    info!("Simulation took {:.3} s", t0.elapsed().as_secs_f64());

    print_timeline(model.get_daily_reports());
    if let Some(peak) = model.get_daily_reports().peak_active() {
        println!();
        println!("Peak E+I: {} on {}", peak.exposed + peak.infectious, peak.time);
    }
    Ok(())
}
