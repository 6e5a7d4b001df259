//! Simulation driver
//!
//! `Engine` owns the body collection for the whole run and advances it a
//! fixed number of steps. Results come out as a lazy stream of
//! [`StepRecord`]s, one per body per step, in roster order.

use log::debug;

use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::symplectic_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};
use crate::simulation::vector::Vec3;

/// State of one body after a step, tagged with the elapsed simulated day
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub elapsed_days: f64,
    pub name: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

impl StepRecord {
    fn from_body(step: usize, elapsed_days: f64, b: &Body) -> Self {
        Self {
            step,
            elapsed_days,
            name: b.name().to_string(),
            position: b.position,
            velocity: b.velocity,
            acceleration: b.acceleration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stepping,
    Done,
}

pub struct Engine {
    system: System,
    forces: AccelSet,
    parameters: Parameters,
    steps_taken: usize,
    scratch: Vec<Vec3>,
}

impl Engine {
    /// Engine with direct Newtonian gravity as the only force term
    pub fn new(system: System, parameters: Parameters) -> Self {
        let forces = AccelSet::new().with(NewtonianGravity::default());
        Self::with_forces(system, forces, parameters)
    }

    pub fn with_forces(system: System, forces: AccelSet, parameters: Parameters) -> Self {
        let n = system.len();
        Self {
            system,
            forces,
            parameters,
            steps_taken: 0,
            scratch: vec![Vec3::zeros(); n],
        }
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn state(&self) -> RunState {
        if self.steps_taken < self.parameters.total_steps {
            RunState::Stepping
        } else {
            RunState::Done
        }
    }

    /// Advance one step, returning its 0-based index, or `None` once all
    /// `total_steps` have run
    pub fn step(&mut self) -> Option<usize> {
        if self.state() == RunState::Done {
            return None;
        }
        let step = self.steps_taken;
        symplectic_euler(&mut self.system, &self.forces, &self.parameters, &mut self.scratch);
        self.steps_taken += 1;
        debug!("step {} done, t = {} s", step, self.system.t);
        Some(step)
    }

    /// Records describing the current body states, tagged as `step`
    pub fn snapshot(&self, step: usize) -> Vec<StepRecord> {
        let day = self.parameters.elapsed_days(step);
        self.system
            .bodies
            .iter()
            .map(|b| StepRecord::from_body(step, day, b))
            .collect()
    }

    /// Lazily step the remaining run, yielding one record per body per step
    pub fn records(&mut self) -> Records<'_> {
        Records {
            engine: self,
            pending: Vec::new().into_iter(),
        }
    }

    /// Run all remaining steps without emitting anything
    pub fn run_to_end(&mut self) {
        while self.step().is_some() {}
    }
}

/// Lazy record stream returned by [`Engine::records`]
///
/// A step is computed only when the records of the previous one have been
/// consumed. Once the engine is done the stream ends for good.
pub struct Records<'a> {
    engine: &'a mut Engine,
    pending: std::vec::IntoIter<StepRecord>,
}

impl Records<'_> {
    /// Records of the next step as one batch, with the step index
    ///
    /// If the stream was partially consumed the rest of the current step is
    /// returned first.
    pub fn next_step(&mut self) -> Option<(usize, Vec<StepRecord>)> {
        let rest: Vec<StepRecord> = self.pending.by_ref().collect();
        if let Some(first) = rest.first() {
            return Some((first.step, rest));
        }
        let step = self.engine.step()?;
        Some((step, self.engine.snapshot(step)))
    }
}

impl Iterator for Records<'_> {
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        loop {
            if let Some(r) = self.pending.next() {
                return Some(r);
            }
            let step = self.engine.step()?;
            self.pending = self.engine.snapshot(step).into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_steps = self.engine.parameters.total_steps - self.engine.steps_taken;
        let n = self.pending.len() + remaining_steps * self.engine.system.len();
        (n, Some(n))
    }
}
