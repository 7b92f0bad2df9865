//! `epi-output` — SEIR timeline writers for the epideux simulator.
//!
//! | Backend | Files created          |
//! |---------|------------------------|
//! | CSV     | `seir_timeline.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`ReportOutputObserver`], which implements `epi_model::ReportObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, ReportOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportOutputObserver::new(writer);
//! model.simulate_with(SimDuration::days(60), &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! obs.into_writer().finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportOutputObserver;
pub use row::SeirRow;
pub use writer::OutputWriter;
