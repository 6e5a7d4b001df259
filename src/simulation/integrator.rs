//! Fixed-step time integrator for the N-body system
//!
//! Semi-implicit (symplectic) Euler driven by an `AccelSet` and `Parameters`.
//! One force evaluation per step, split into two phases: every body's
//! acceleration is accumulated from the positions at the start of the step,
//! and only then is any body moved.

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::System;
use super::vector::Vec3;

/// Advance the system by one step of `params.dt`
///
/// `scratch` is the per-body accumulator buffer; it is resized to the body
/// count if needed so callers can reuse it between steps.
pub fn symplectic_euler(sys: &mut System, forces: &AccelSet, params: &Parameters, scratch: &mut Vec<Vec3>) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, only time advances
        sys.t += params.dt;
        return;
    }
    let dt = params.dt;

    // Explicit reset of every accumulator
    for b in sys.bodies.iter_mut() {
        b.reset_acceleration();
    }
    scratch.resize(n, Vec3::zeros());

    // Accumulate from a read-only view: nobody moves until all pairs are done
    forces.accumulate_accels(&sys.bodies, scratch);
    for (b, a) in sys.bodies.iter_mut().zip(scratch.iter()) {
        b.accumulate_acceleration(*a);
    }

    // Kick then drift, v_n+1 = v_n + dt a_n ; x_n+1 = x_n + dt v_n+1
    for b in sys.bodies.iter_mut() {
        b.update_velocity_and_position(dt);
    }

    sys.t += dt;
}
