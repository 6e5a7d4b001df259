//! Conserved-quantity diagnostics for a body collection.
//!
//! An isolated system under pairwise gravity conserves total momentum (and
//! so the centre-of-mass velocity) exactly in the continuous problem, and
//! total energy up to the bounded oscillation of a symplectic integrator.
//! These helpers measure drift from a baseline taken before the run.

use crate::simulation::states::{Body, G};
use crate::simulation::vector::Vec3;

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}

/// Total linear momentum: sum_i m_i * v_i
pub fn total_momentum(bodies: &[Body]) -> Vec3 {
    let mut momentum = Vec3::zeros();
    for b in bodies {
        momentum += b.velocity.scale(b.mass);
    }
    momentum
}

pub fn center_of_mass_velocity(bodies: &[Body]) -> Vec3 {
    let m = total_mass(bodies);
    if m == 0.0 {
        return Vec3::zeros();
    }
    total_momentum(bodies).scale(1.0 / m)
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass * b.velocity.dot(&b.velocity))
        .sum()
}

/// Pairwise gravitational potential energy, coincident pairs skipped
pub fn potential_energy(bodies: &[Body]) -> f64 {
    let mut energy = 0.0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let d = (bodies[j].position - bodies[i].position).magnitude();
            if d == 0.0 {
                continue;
            }
            energy -= G * bodies[i].mass * bodies[j].mass / d;
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body]) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies)
}

/// Baseline quantities to track drift against
#[derive(Debug, Clone, Copy)]
pub struct ConservationState {
    pub baseline_energy: f64,
    pub baseline_momentum: Vec3,
}

impl ConservationState {
    pub fn new(bodies: &[Body]) -> Self {
        Self {
            baseline_energy: total_energy(bodies),
            baseline_momentum: total_momentum(bodies),
        }
    }
}

/// Drift measured against a [`ConservationState`]
#[derive(Debug, Clone, Copy)]
pub struct ConservationMonitor {
    /// |E - E0| / |E0|, or the absolute error when E0 is ~0
    pub energy_error: f64,
    /// |p - p0|
    pub momentum_error: f64,
}

impl ConservationMonitor {
    pub fn check(baseline: &ConservationState, bodies: &[Body]) -> Self {
        let energy = total_energy(bodies);
        let energy_error = if baseline.baseline_energy.abs() > 1e-12 {
            (energy - baseline.baseline_energy).abs() / baseline.baseline_energy.abs()
        } else {
            (energy - baseline.baseline_energy).abs()
        };

        Self {
            energy_error,
            momentum_error: (total_momentum(bodies) - baseline.baseline_momentum).magnitude(),
        }
    }

    /// Relative energy drift beyond `energy_tol`, or momentum drift beyond
    /// `momentum_tol` times the baseline momentum scale
    pub fn is_violated(&self, baseline: &ConservationState, energy_tol: f64, momentum_tol: f64) -> bool {
        let scale = baseline.baseline_momentum.magnitude().max(1.0);
        self.energy_error > energy_tol || self.momentum_error / scale > momentum_tol
    }
}
