//! Build a ready-to-run simulation from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! run parameters plus the system state with every body at t = 0 and its
//! acceleration zeroed. `into_engine` hands the bundle to the driver.

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Self {
        // Bodies: map `BodyConfig` -> runtime `Body`, roster order kept
        let bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| {
            Body::new(bc.name.clone(), bc.m, bc.x.into(), bc.v.into())
        }).collect();

        Self {
            parameters: Parameters::new(cfg.parameters.dt, cfg.parameters.steps),
            system: System::new(bodies),
        }
    }

    pub fn into_engine(self) -> Engine {
        Engine::new(self.system, self.parameters)
    }
}
