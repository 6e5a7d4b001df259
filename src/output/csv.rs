//! Tabular results file
//!
//! One header row, then one comma-separated row per body per step. Reals use
//! default `f64` formatting, which round-trips exactly.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{StepRecord, StepSink};

pub const CSV_HEADER: &str = "Day,Body,PosX,PosY,PosZ,VelX,VelY,VelZ,AccX,AccY,AccZ";

pub struct CsvSink<W: Write> {
    out: W,
    header_written: bool,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, header_written: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ensure_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.out, "{}", CSV_HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }
}

/// Format one record as a data row, without the line terminator
pub fn format_row(rec: &StepRecord) -> String {
    let [px, py, pz] = rec.position.to_array();
    let [vx, vy, vz] = rec.velocity.to_array();
    let [ax, ay, az] = rec.acceleration.to_array();
    format!(
        "{},{},{},{},{},{},{},{},{},{},{}",
        rec.elapsed_days, rec.name, px, py, pz, vx, vy, vz, ax, ay, az
    )
}

impl<W: Write> StepSink for CsvSink<W> {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn begin_step(&mut self, _step: usize, _elapsed_days: f64) -> io::Result<()> {
        self.ensure_header()
    }

    fn record(&mut self, rec: &StepRecord) -> io::Result<()> {
        self.ensure_header()?;
        writeln!(self.out, "{}", format_row(rec))
    }

    // A run with zero steps still leaves a header-only file
    fn finish(&mut self) -> io::Result<()> {
        self.ensure_header()?;
        self.out.flush()
    }
}
