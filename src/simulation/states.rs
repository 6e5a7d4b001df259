//! Core state types for the N-body simulation.
//!
//! - `Body`   a named point mass with position, velocity and the
//!            acceleration accumulated for the current step
//! - `System` the flat, exclusively owned collection of bodies plus the
//!            elapsed simulated time `t` in seconds

use crate::simulation::vector::Vec3;

/// Newtonian gravitational constant, m^3 kg^-1 s^-2
pub const G: f64 = 6.67430e-11;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    pub mass: f64,         // kg, assumed > 0
    pub position: Vec3,    // m
    pub velocity: Vec3,    // m/s
    pub acceleration: Vec3, // m/s^2, rebuilt every step
}

impl Body {
    pub fn new(name: impl Into<String>, mass: f64, position: Vec3, velocity: Vec3) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            acceleration: Vec3::zeros(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gravitational acceleration this body feels from `other`
    ///
    /// `a = normalize(r) * G * m_other / |r|^2` with `r` pointing from this
    /// body to `other`. Coincident bodies contribute exactly zero.
    pub fn acceleration_from(&self, other: &Body) -> Vec3 {
        let r = other.position - self.position;
        let distance = r.magnitude();
        if distance == 0.0 {
            return Vec3::zeros();
        }
        let scalar = G * other.mass / (distance * distance);
        r.normalize().scale(scalar)
    }

    /// Pairwise variant: overwrite the acceleration with the pull of `other` alone
    pub fn compute_acceleration_from(&mut self, other: &Body) {
        self.acceleration = self.acceleration_from(other);
    }

    pub fn reset_acceleration(&mut self) {
        self.acceleration = Vec3::zeros();
    }

    pub fn accumulate_acceleration(&mut self, a: Vec3) {
        self.acceleration += a;
    }

    /// Semi-implicit Euler: velocity first from the current acceleration,
    /// then position from the updated velocity
    pub fn update_velocity_and_position(&mut self, dt: f64) {
        self.velocity += self.acceleration.scale(dt);
        self.position += self.velocity.scale(dt);
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // roster order is preserved for output
    pub t: f64,            // elapsed time, s
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
