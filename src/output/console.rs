//! Human-readable trace: a `Day <d>:` header per step, then one
//! `<name>: (x, y, z)` position line per body
//!
//! The trace is best effort: on a write error (e.g. a closed pipe) the run
//! logs it and carries on without this sink.

use std::io::{self, Stdout, Write};

use super::{StepRecord, StepSink};

pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StepSink for ConsoleSink<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    fn begin_step(&mut self, _step: usize, elapsed_days: f64) -> io::Result<()> {
        writeln!(self.out, "Day {}:", elapsed_days)
    }

    fn record(&mut self, rec: &StepRecord) -> io::Result<()> {
        writeln!(self.out, "{}: {}", rec.name, rec.position)
    }

    // a closed stdout must not cost the results file
    fn is_fatal(&self) -> bool {
        false
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
