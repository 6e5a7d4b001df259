//! Emission of simulation results
//!
//! The engine produces [`StepRecord`]s; sinks implementing [`StepSink`]
//! turn them into text. [`run_to_sinks`] drives a whole run, completing each
//! step in memory before any sink sees it, so a failing sink can stop the
//! run but never leaves the bodies half-advanced. Only fatal sinks stop it;
//! a non-fatal one is dropped from the run on its first error.

pub mod console;
pub mod csv;
pub mod hook;

use log::{info, warn};
use thiserror::Error;

use crate::simulation::diagnostics::{ConservationMonitor, ConservationState};
use crate::simulation::engine::Engine;
pub use crate::simulation::engine::StepRecord;

/// Relative energy drift above which a finished run is flagged
pub const ENERGY_DRIFT_WARN: f64 = 1e-3;
/// Momentum drift, relative to the initial momentum scale, above which a run is flagged
pub const MOMENTUM_DRIFT_WARN: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("sink `{sink}` failed at step {step}: {source}")]
    Sink {
        sink: &'static str,
        step: usize,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Consumer of per-step records
pub trait StepSink {
    /// Short name used in errors and logs
    fn name(&self) -> &'static str;

    /// Called once per step, before that step's records
    fn begin_step(&mut self, _step: usize, _elapsed_days: f64) -> std::io::Result<()> {
        Ok(())
    }

    fn record(&mut self, rec: &StepRecord) -> std::io::Result<()>;

    /// Whether a write error from this sink aborts the run
    fn is_fatal(&self) -> bool {
        true
    }

    /// Called once after the last step
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// What a completed run produced
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub steps: usize,
    pub records: usize,
    pub last_elapsed_days: Option<f64>,
    pub energy_error: f64,
    pub momentum_error: f64,
}

/// Step `engine` to completion, handing every step's records to each sink
pub fn run_to_sinks(engine: &mut Engine, sinks: &mut [&mut dyn StepSink]) -> Result<RunSummary> {
    let params = *engine.parameters();
    info!(
        "running {} bodies for {} steps of {} s",
        engine.system().len(),
        params.total_steps,
        params.dt
    );

    let baseline = ConservationState::new(engine.bodies());
    let mut steps = 0;
    let mut records = 0;
    let mut last_elapsed_days = None;
    let mut detached = vec![false; sinks.len()];

    // stream holds the engine mutably until the end of this block
    {
        let mut stream = engine.records();
        while let Some((step, batch)) = stream.next_step() {
            let day = params.elapsed_days(step);
            for (sink, off) in sinks.iter_mut().zip(detached.iter_mut()) {
                if *off {
                    continue;
                }
                let written = sink
                    .begin_step(step, day)
                    .and_then(|_| batch.iter().try_for_each(|rec| sink.record(rec)));
                if let Err(source) = written {
                    *off = detach_or_fail(&**sink, step, source)?;
                }
            }
            steps += 1;
            records += batch.len();
            last_elapsed_days = Some(day);
        }
    }

    for (sink, off) in sinks.iter_mut().zip(detached.iter()) {
        if *off {
            continue;
        }
        if let Err(source) = sink.finish() {
            detach_or_fail(&**sink, steps, source)?;
        }
    }

    let drift = ConservationMonitor::check(&baseline, engine.bodies());
    if drift.is_violated(&baseline, ENERGY_DRIFT_WARN, MOMENTUM_DRIFT_WARN) {
        warn!(
            "conservation drift: energy {:e} (relative), momentum {:e} kg m/s",
            drift.energy_error, drift.momentum_error
        );
    }
    info!(
        "run finished: {} steps, {} records, energy drift {:e}",
        steps, records, drift.energy_error
    );

    Ok(RunSummary {
        steps,
        records,
        last_elapsed_days,
        energy_error: drift.energy_error,
        momentum_error: drift.momentum_error,
    })
}

/// Turn a sink write error into a run error, or, for a non-fatal sink, log
/// it and report that the sink should be detached
fn detach_or_fail(sink: &dyn StepSink, step: usize, source: std::io::Error) -> Result<bool> {
    if sink.is_fatal() {
        return Err(OutputError::Sink { sink: sink.name(), step, source });
    }
    warn!("sink `{}` failed at step {}, detaching it: {}", sink.name(), step, source);
    Ok(true)
}
