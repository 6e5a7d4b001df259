pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;

pub use simulation::vector::Vec3;
pub use simulation::states::{Body, System, G};
pub use simulation::params::{Parameters, SECONDS_PER_DAY};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::symplectic_euler;
pub use simulation::engine::{Engine, Records, RunState, StepRecord};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, ConfigError, ParametersConfig, ScenarioConfig};

pub use output::{run_to_sinks, OutputError, RunSummary, StepSink};
pub use output::console::ConsoleSink;
pub use output::csv::CsvSink;
pub use output::hook::PlotHook;

pub use benchmark::benchmark::bench_step_curve;
