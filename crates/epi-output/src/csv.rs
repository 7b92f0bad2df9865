//! CSV output backend.
//!
//! Creates `seir_timeline.csv` in the configured output directory, one row
//! per snapshot.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::debug;

use epi_model::SeirReport;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, SeirRow};

pub const TIMELINE_FILE: &str = "seir_timeline.csv";

/// Writes the SEIR timeline to a CSV file.
pub struct CsvWriter {
    timeline: Writer<File>,
    path:     PathBuf,
    rows:     usize,
    finished: bool,
}

impl CsvWriter {
    /// Create `seir_timeline.csv` in `dir` (truncating any existing file)
    /// and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(TIMELINE_FILE);
        let mut timeline = Writer::from_path(&path)?;
        timeline.write_record(SeirRow::HEADER)?;
        debug!("writing SEIR timeline to {}", path.display());

        Ok(Self {
            timeline,
            path,
            rows: 0,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }
}

impl OutputWriter for CsvWriter {
    fn write_report(&mut self, report: &SeirReport) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.timeline.write_record(SeirRow::from(report).fields())?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.timeline.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.timeline.flush()?;
        debug!("{} rows written to {}", self.rows, self.path.display());
        Ok(())
    }
}
