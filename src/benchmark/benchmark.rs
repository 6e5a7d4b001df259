use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};
use crate::simulation::vector::Vec3;

/// Helper to build a manual System of size `n`
/// Deterministic positions on a ~1 AU shell, no rand needed
pub fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = Vec3::new(
            (i_f * 0.37).sin() * 1.5e11,
            (i_f * 0.13).cos() * 1.5e11,
            (i_f * 0.07).sin() * 1.5e11,
        );

        bodies.push(Body::new(format!("b{i}"), 1.0e24, x, Vec3::zeros()));
    }

    System::new(bodies)
}

/// Benchmark `Engine::step` for a range of n
/// Prints `N,step_ms`, paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (50..=1000).step_by(50) {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 200 { 20 } else { 3 };

        let mut engine = Engine::new(make_system(n), Parameters::new(21_600.0, steps + 1));

        // Warm-up one step
        engine.step();

        let t0 = Instant::now();
        for _ in 0..steps {
            engine.step();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
