//! Shared setup for the epideux demo binaries.

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use epi_model::SeirTimeline;

// ISO 8601 timestamp, colour-coded level, target.
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Route `log` records at `level` and above to stdout.
///
/// `EPI_LOG=trace|debug|info|warn|error` overrides `level`.
pub fn init_console_logger(level: LevelFilter) -> Result<()> {
    let level = match std::env::var("EPI_LOG") {
        Ok(v) => v.parse().map_err(|e| anyhow!("EPI_LOG={v}: {e}"))?,
        Err(_) => level,
    };
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .context("building log4rs config")?;
    log4rs::init_config(config).map_err(|e| anyhow!("installing logger: {e}"))?;
    Ok(())
}

/// Positional argument `idx` parsed as `T`, or `default` if absent.
pub fn arg_or<T>(idx: usize, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::args().nth(idx) {
        Some(raw) => raw.parse().with_context(|| format!("invalid {name}: {raw:?}")),
        None => Ok(default),
    }
}

/// Print one line per snapshot.
pub fn print_timeline(timeline: &SeirTimeline) {
    println!(
        "{:<21} {:>9} {:>9} {:>9} {:>9}",
        "time", "S", "E", "I", "R"
    );
    println!("{}", "-".repeat(61));
    for r in timeline {
        println!(
            "{:<21} {:>9} {:>9} {:>9} {:>9}",
            r.time.to_string(),
            r.susceptible,
            r.exposed,
            r.infectious,
            r.recovered
        );
    }
}
