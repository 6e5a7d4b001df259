use approx::assert_relative_eq;

use gravsim::simulation::diagnostics::{
    center_of_mass_velocity, total_energy, ConservationMonitor, ConservationState,
};
use gravsim::{AccelSet, Body, Engine, NewtonianGravity, Parameters, RunState, System, Vec3, G};

const SUN_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;
const AU: f64 = 1.496e11;

/// Sun at the origin and Earth on +x moving along +y
pub fn sun_earth() -> System {
    System::new(vec![
        Body::new("Sun", SUN_MASS, Vec3::zeros(), Vec3::zeros()),
        Body::new("Earth", EARTH_MASS, Vec3::new(AU, 0.0, 0.0), Vec3::new(0.0, 29_780.0, 0.0)),
    ])
}

/// Build a simple 2-body System separated along x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        Body::new("a", m1, Vec3::new(-dist / 2.0, 0.0, 0.0), Vec3::zeros()),
        Body::new("b", m2, Vec3::new(dist / 2.0, 0.0, 0.0), Vec3::zeros()),
    ])
}

pub fn gravity_set() -> AccelSet {
    AccelSet::new().with(NewtonianGravity::default())
}

fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
    assert!((a - b).magnitude() <= eps, "{} != {} (eps {})", a, b, eps);
}

// ==================================================================================
// Vector tests
// ==================================================================================

#[test]
fn vector_add_then_subtract_returns_original() {
    let a = Vec3::new(1.5, -2.25, 3.0e10);
    let b = Vec3::new(-7.0, 0.125, 4.0e9);
    assert_vec_close((a + b) - b, a, 1e-6);
}

#[test]
fn vector_normalize_has_unit_length() {
    for v in [
        Vec3::new(3.0, 4.0, 0.0),
        Vec3::new(-1.0e11, 2.0e10, 5.0),
        Vec3::new(1e-20, 0.0, -1e-20),
    ] {
        assert_relative_eq!(v.normalize().magnitude(), 1.0, max_relative = 1e-12);
    }
}

#[test]
fn vector_normalize_zero_is_zero() {
    let z = Vec3::zeros();
    assert_eq!(z.normalize(), z);
    assert_eq!(z.magnitude(), 0.0);
    assert!(z.normalize().to_array().iter().all(|c| c.is_finite()));
}

#[test]
fn vector_dot_is_symmetric() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 0.5, 10.0);
    assert_eq!(a.dot(&b), b.dot(&a));
    assert_eq!(a.dot(&b), 27.0);
}

#[test]
fn vector_scale_scales_magnitude() {
    let a = Vec3::new(2.0, -3.0, 6.0);
    for k in [-2.5, 0.1, 0.0, 4.0] {
        assert_relative_eq!(a.scale(k).magnitude(), k.abs() * a.magnitude(), max_relative = 1e-12);
    }
    assert_eq!(a * 2.0, 2.0 * a);
    assert_eq!(-a, a.scale(-1.0));
}

#[test]
fn vector_display_uses_default_formatting() {
    assert_eq!(Vec3::new(1.0, -2.5, 0.125).to_string(), "(1, -2.5, 0.125)");
    assert_eq!(Vec3::zeros().to_string(), "(0, 0, 0)");
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn acceleration_ratio_matches_inverse_mass_ratio() {
    let a = Body::new("A", 2.0e24, Vec3::zeros(), Vec3::zeros());
    let b = Body::new("B", 6.0e24, Vec3::new(1.0e9, 2.0e8, -3.0e8), Vec3::zeros());

    let a_on_a = a.acceleration_from(&b);
    let a_on_b = b.acceleration_from(&a);

    assert_relative_eq!(a_on_a.magnitude() / a_on_b.magnitude(), b.mass / a.mass, max_relative = 1e-12);
    // equal and opposite forces
    assert_vec_close(a_on_a.scale(a.mass) + a_on_b.scale(b.mass), Vec3::zeros(), 1e-6 * a_on_a.magnitude() * a.mass);
}

#[test]
fn coincident_bodies_contribute_exactly_zero() {
    let p = Vec3::new(1.0e10, -5.0, 3.0);
    let a = Body::new("A", 1.0e24, p, Vec3::zeros());
    let b = Body::new("B", 1.0e30, p, Vec3::zeros());

    assert_eq!(a.acceleration_from(&b), Vec3::zeros());

    let mut a2 = a.clone();
    a2.acceleration = Vec3::new(1.0, 1.0, 1.0);
    a2.compute_acceleration_from(&b);
    assert_eq!(a2.acceleration, Vec3::zeros());
}

#[test]
fn coincident_bodies_step_stays_finite() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let sys = System::new(vec![
        Body::new("A", 1.0e24, p, Vec3::new(1.0, 0.0, 0.0)),
        Body::new("B", 1.0e24, p, Vec3::zeros()),
    ]);
    let mut engine = Engine::new(sys, Parameters::new(10.0, 1));
    engine.step();

    for b in engine.bodies() {
        assert_eq!(b.acceleration, Vec3::zeros());
        assert!(b.position.to_array().iter().all(|c| c.is_finite()));
    }
    assert_vec_close(engine.bodies()[0].position, Vec3::new(11.0, 2.0, 3.0), 1e-12);
}

#[test]
fn compute_acceleration_from_overwrites() {
    let mut earth = sun_earth().bodies[1].clone();
    let sun = sun_earth().bodies[0].clone();
    earth.acceleration = Vec3::new(5.0, 5.0, 5.0);
    earth.compute_acceleration_from(&sun);
    assert_eq!(earth.acceleration, earth.acceleration_from(&sun));
}

#[test]
fn integration_uses_updated_velocity_for_position() {
    let p0 = Vec3::new(1.0, 2.0, 3.0);
    let v0 = Vec3::new(0.5, 0.0, -1.0);
    let a = Vec3::new(2.0, 0.0, 1.0);
    let dt = 0.1;

    let mut body = Body::new("test mass", 1.0, p0, v0);
    body.acceleration = a;
    body.update_velocity_and_position(dt);

    let v1 = v0 + a * dt;
    assert_vec_close(body.velocity, v1, 1e-12);
    assert_vec_close(body.position, p0 + v1 * dt, 1e-12);
    // explicit Euler would have moved with v0
    assert!((body.position - (p0 + v0 * dt)).magnitude() > 1e-3);
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0e9, 2.0e24, 3.0e24);
    let forces = gravity_set();

    let mut acc = vec![Vec3::zeros(); 2];
    forces.accumulate_accels(&sys.bodies, &mut acc);

    let net = acc[0] * sys.bodies[0].mass + acc[1] * sys.bodies[1].mass;
    let scale = acc[0].magnitude() * sys.bodies[0].mass;

    assert!(net.magnitude() < 1e-12 * scale, "Net force not zero: {}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0e9, 1.0e24, 1.0e24);
    let forces = gravity_set();

    let mut acc = vec![Vec3::zeros(); 2];
    forces.accumulate_accels(&sys.bodies, &mut acc);

    let dx = sys.bodies[1].position - sys.bodies[0].position;
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0e9, 1.0e24, 1.0e24);
    let sys_2r = two_body_system(2.0e9, 1.0e24, 1.0e24);
    let forces = gravity_set();

    let mut acc_r = vec![Vec3::zeros(); 2];
    let mut acc_2r = vec![Vec3::zeros(); 2];

    forces.accumulate_accels(&sys_r.bodies, &mut acc_r);
    forces.accumulate_accels(&sys_2r.bodies, &mut acc_2r);

    let ratio = acc_r[0].magnitude() / acc_2r[0].magnitude();
    assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
}

#[test]
fn accumulate_resets_buffer() {
    let sys = two_body_system(1.0e9, 1.0e24, 1.0e24);
    let forces = gravity_set();

    let mut fresh = vec![Vec3::zeros(); 2];
    let mut dirty = vec![Vec3::new(1.0, 2.0, 3.0); 2];
    forces.accumulate_accels(&sys.bodies, &mut fresh);
    forces.accumulate_accels(&sys.bodies, &mut dirty);

    assert_eq!(fresh, dirty);
}

#[test]
fn two_body_reference_acceleration() {
    let mut engine = Engine::new(sun_earth(), Parameters::new(0.0, 1));
    engine.step();

    let earth = &engine.bodies()[1];
    let expected = G * SUN_MASS / (AU * AU);

    assert_relative_eq!(earth.acceleration.magnitude(), expected, max_relative = 1e-12);
    assert!((earth.acceleration.magnitude() - 5.93e-3).abs() < 1e-5);
    // directed at the Sun, i.e. along -x
    assert_vec_close(earth.acceleration.normalize(), Vec3::new(-1.0, 0.0, 0.0), 1e-12);
    // zero step size leaves the state where it was
    assert_eq!(earth.position, Vec3::new(AU, 0.0, 0.0));
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn step_accumulates_before_moving_anyone() {
    let sys = System::new(vec![
        Body::new("a", 5.0e24, Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0e3, 0.0)),
        Body::new("b", 1.0e23, Vec3::new(4.0e8, 0.0, 0.0), Vec3::new(0.0, -2.0e3, 0.0)),
        Body::new("c", 7.0e22, Vec3::new(0.0, 3.0e8, 1.0e7), Vec3::new(5.0e2, 0.0, 0.0)),
    ]);
    let before = sys.bodies.clone();
    let dt = 3600.0;

    // accelerations from the start-of-step positions only
    let expected: Vec<Vec3> = (0..before.len())
        .map(|i| {
            let mut a = Vec3::zeros();
            for j in 0..before.len() {
                if i != j {
                    a += before[i].acceleration_from(&before[j]);
                }
            }
            a
        })
        .collect();

    let mut engine = Engine::new(sys, Parameters::new(dt, 1));
    engine.step();

    for (i, b) in engine.bodies().iter().enumerate() {
        assert_eq!(b.acceleration, expected[i]);
        let v1 = before[i].velocity + expected[i] * dt;
        assert_eq!(b.velocity, v1);
        assert_eq!(b.position, before[i].position + v1 * dt);
    }
}

#[test]
fn engine_runs_exactly_total_steps() {
    let mut engine = Engine::new(sun_earth(), Parameters::new(21_600.0, 5));
    assert_eq!(engine.state(), RunState::Stepping);

    let mut indices = Vec::new();
    while let Some(step) = engine.step() {
        indices.push(step);
    }

    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(engine.state(), RunState::Done);
    assert_eq!(engine.step(), None);
    assert_relative_eq!(engine.system().t, 5.0 * 21_600.0);
}

#[test]
fn records_stream_is_lazy_and_sized() {
    let mut engine = Engine::new(sun_earth(), Parameters::new(21_600.0, 3));
    {
        let mut records = engine.records();
        assert_eq!(records.size_hint(), (6, Some(6)));
        let _ = records.next();
    }
    // only the first step has been computed
    assert_eq!(engine.steps_taken(), 1);

    let mut engine = Engine::new(sun_earth(), Parameters::new(21_600.0, 3));
    let mut records = engine.records();
    let first = records.next().expect("first record");
    assert_eq!(first.name, "Sun");
    assert_eq!(first.step, 0);
    assert_eq!(records.size_hint(), (5, Some(5)));

    let rest: Vec<_> = records.collect();
    assert_eq!(rest.len(), 5);
    assert_eq!(rest[0].name, "Earth");
    assert_eq!(rest[0].step, 0);
    assert_eq!(rest[4].step, 2);

    // not restartable
    assert_eq!(engine.steps_taken(), 3);
    assert_eq!(engine.records().count(), 0);
}

#[test]
fn last_record_day_for_reference_run() {
    let cfg = gravsim::ScenarioConfig::solar_system();
    let mut engine = gravsim::Scenario::build_scenario(&cfg).into_engine();

    let records: Vec<_> = engine.records().collect();

    assert_eq!(records.len(), 1460 * 9);
    assert_eq!(records[0].elapsed_days, 0.0);
    assert_eq!(records[9].elapsed_days, 0.25);
    let last = records.last().expect("records");
    assert_eq!(last.elapsed_days, 364.75);
    assert_eq!(last.name, "Neptune");
    assert!(records.iter().all(|r| r.position.to_array().iter().all(|c| c.is_finite())));
}

#[test]
fn empty_roster_runs_without_records() {
    let mut engine = Engine::new(System::new(Vec::new()), Parameters::new(1.0, 4));
    assert_eq!(engine.records().count(), 0);
    assert_eq!(engine.state(), RunState::Done);
}

// ==================================================================================
// Conservation tests
// ==================================================================================

#[test]
fn center_of_mass_velocity_is_constant_for_two_bodies() {
    let mut engine = Engine::new(sun_earth(), Parameters::new(21_600.0, 1460));
    let v0 = center_of_mass_velocity(engine.bodies());
    assert!(v0.magnitude() > 0.0);

    while engine.step().is_some() {
        let v = center_of_mass_velocity(engine.bodies());
        assert!((v - v0).magnitude() < 1e-9, "COM velocity drifted: {} vs {}", v, v0);
    }
}

#[test]
fn energy_stays_bounded_over_one_orbit() {
    let mut engine = Engine::new(sun_earth(), Parameters::new(21_600.0, 1460));
    let e0 = total_energy(engine.bodies());
    assert!(e0 < 0.0, "bound orbit expected");

    engine.run_to_end();

    let e1 = total_energy(engine.bodies());
    assert!(((e1 - e0) / e0).abs() < 1e-3, "energy drift {}", (e1 - e0) / e0);
}

#[test]
fn conservation_monitor_clean_run_is_not_violated() {
    let mut engine = Engine::new(sun_earth(), Parameters::new(21_600.0, 1460));
    let baseline = ConservationState::new(engine.bodies());
    engine.run_to_end();

    let drift = ConservationMonitor::check(&baseline, engine.bodies());
    assert!(drift.energy_error < 1e-3, "energy drift {:e}", drift.energy_error);
    assert!(!drift.is_violated(&baseline, 1e-3, 1e-9));
}

#[test]
fn conservation_monitor_flags_momentum_kick() {
    let sys = sun_earth();
    let baseline = ConservationState::new(&sys.bodies);

    // reversing Earth's velocity keeps the energy exactly and flips its momentum
    let mut bodies = sys.bodies.clone();
    bodies[1].velocity = -bodies[1].velocity;

    let drift = ConservationMonitor::check(&baseline, &bodies);
    assert_eq!(drift.energy_error, 0.0);
    assert_relative_eq!(drift.momentum_error, 2.0 * EARTH_MASS * 29_780.0, max_relative = 1e-12);
    assert!(drift.is_violated(&baseline, 1e-3, 1e-9));
}

#[test]
fn conservation_monitor_flags_energy_jump() {
    let sys = sun_earth();
    let baseline = ConservationState::new(&sys.bodies);

    // moving Earth outward changes only the potential energy
    let mut bodies = sys.bodies.clone();
    bodies[1].position = Vec3::new(2.0 * AU, 0.0, 0.0);

    let drift = ConservationMonitor::check(&baseline, &bodies);
    assert_eq!(drift.momentum_error, 0.0);
    assert!(drift.energy_error > 1e-3, "energy drift {:e}", drift.energy_error);
    assert!(drift.is_violated(&baseline, 1e-3, 1e-9));
    assert!(!drift.is_violated(&baseline, drift.energy_error, 1e-9));
}
