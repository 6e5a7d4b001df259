//! Acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the set that sums contributors into a
//! per-body buffer, and direct (all ordered pairs) Newtonian gravity

use crate::simulation::states::{Body, G};
use crate::simulation::vector::Vec3;

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all `bodies`
    /// - `out[i]` is reset, then set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [Vec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = Vec3::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(bodies, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration source operating on a read-only view of the bodies
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], out: &mut [Vec3]);
}

/// Unsoftened Newtonian gravity, direct O(n^2) sum
///
/// Every ordered pair (i, j), i != j, is visited and body i receives
/// `normalize(r_ij) * G * m_j / |r_ij|^2`. Pairs at exactly zero separation
/// are skipped.
pub struct NewtonianGravity {
    pub g: f64,
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self { g: G }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [Vec3]) {
        let n = bodies.len();
        if n == 0 { // No bodies, return
            return;
        }

        for i in 0..n {
            let xi = bodies[i].position;

            for j in 0..n {
                if i == j {
                    continue;
                }
                let bj = &bodies[j];

                // r points from i to j, so i is pulled along +r
                let r = bj.position - xi;
                let distance = r.magnitude();
                if distance == 0.0 {
                    continue;
                }

                let scalar = self.g * bj.mass / (distance * distance);
                out[i] += r.normalize().scale(scalar);
            }
        }
    }
}
