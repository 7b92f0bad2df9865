//! two-age — an old and a young household.
//!
//! The young household is seeded with one infection.  From the middle of the
//! run onward, every young person visits the old household for two hours a
//! day.  The timeline is written to `output/two-age/seir_timeline.csv`.
//!
//! Usage: `two-age [young] [old] [beta] [days]`

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::{LevelFilter, info};

use epi_core::{ModelConfig, PersonId, SimDuration};
use epi_demos::{arg_or, init_console_logger, print_timeline};
use epi_model::ModelBuilder;
use epi_output::{CsvWriter, OutputWriter, ReportOutputObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64         = 7;
const INCUBATION: SimDuration = SimDuration::days(4);
const INFECTIOUS: SimDuration = SimDuration::days(5);
const VISIT:      SimDuration = SimDuration::hours(2);
const OUTPUT_DIR: &str        = "output/two-age";

fn main() -> Result<()> {
    init_console_logger(LevelFilter::Info)?;
    let young: usize = arg_or(1, "young", 1_000)?;
    let old:   usize = arg_or(2, "old", 1_000)?;
    let beta:  f64   = arg_or(3, "beta", 0.7)?;
    let days:  i64   = arg_or(4, "days", 120)?;

    println!("=== two-age — epideux ===");
    println!("Young: {young}  |  Old: {old}  |  β: {beta}/day  |  Days: {days}");
    println!();

    let mut model = ModelBuilder::new(ModelConfig::default())
        .seed(SEED)
        .start_date(2020, 4, 1)
        .build()?;

    // 1. Old household.
    let old_home = model.create_location(beta, "old home")?;
    for _ in 0..old {
        model.create_person(old_home, INCUBATION, INFECTIOUS)?;
    }

    // 2. Young household; daily visits during the second half.
    let young_home = model.create_location(beta, "young home")?;
    let t0 = model.current_time();
    let end = t0 + SimDuration::days(days);
    for _ in 0..young {
        let p = model.create_person(young_home, INCUBATION, INFECTIOUS)?;
        let mut t = t0 + SimDuration::days(days / 2);
        while t < end {
            model.add_visit(p, old_home, t, t + VISIT)?;
            t += SimDuration::days(1);
        }
    }
    model.infect(PersonId(old as u32))?;

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = ReportOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 4. Run.
    let started = Instant::now();
    model.simulate_with(SimDuration::days(days), &mut obs)?;
    info!("Simulation took {:.3} s", started.elapsed().as_secs_f64());

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    let mut writer = obs.into_writer();
    writer.finish()?;

    // 5. Summary.
    print_timeline(model.get_daily_reports());
    println!();
    println!("  {} : {} rows", writer.path().display(), writer.rows_written());
    for id in [old_home, young_home] {
        let counts = model.location_report(id)?;
        println!("  {:<12} {counts:?}", model.location(id)?.name());
    }
    Ok(())
}
