//! Run parameters for a simulation
//!
//! `Parameters` holds the fixed step size and the number of steps; both are
//! set once when the scenario is built and never change during a run

/// Seconds per simulated day, used to tag emitted records
pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub dt: f64,            // step size, s
    pub total_steps: usize, // number of steps in the run
}

impl Parameters {
    pub fn new(dt: f64, total_steps: usize) -> Self {
        Self { dt, total_steps }
    }

    /// Elapsed simulated days for a 0-based step index
    pub fn elapsed_days(&self, step: usize) -> f64 {
        step as f64 * self.dt / SECONDS_PER_DAY
    }
}
