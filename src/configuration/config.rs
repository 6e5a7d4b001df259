//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – step size and step count
//! - [`BodyConfig`]       – name, mass and initial state of each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   dt: 21600.0             # step size in seconds
//!   steps: 1460             # number of steps
//!
//! bodies:
//!   - name: Sun
//!     m: 1.989e30           # kg
//!     x: [0.0, 0.0, 0.0]    # m
//!     v: [0.0, 0.0, 0.0]    # m/s
//!   - name: Earth
//!     m: 5.972e24
//!     x: [1.496e11, 0.0, 0.0]
//!     v: [0.0, 29780.0, 0.0]
//! ```
//!
//! Vectors are fixed-size arrays, so a wrong number of components fails at
//! deserialization. Everything else is checked by [`ScenarioConfig::validate`].

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scenario has no bodies")]
    NoBodies,

    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    #[error("step count must be at least 1")]
    NoSteps,

    #[error("body `{name}`: mass must be positive and finite, got {mass}")]
    InvalidMass { name: String, mass: f64 },

    #[error("body `{0}`: position and velocity components must be finite")]
    NonFiniteState(String),

    #[error("duplicate body name `{0}`")]
    DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Run parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub dt: f64,      // step size, s
    pub steps: usize, // total step count
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String, // display name, unique within the scenario
    pub m: f64,       // mass, kg
    pub x: [f64; 3],  // initial position, m
    pub v: [f64; 3],  // initial velocity, m/s
}

impl BodyConfig {
    pub fn new(name: impl Into<String>, m: f64, x: [f64; 3], v: [f64; 3]) -> Self {
        Self { name: name.into(), m, x, v }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // step size and count
    pub bodies: Vec<BodyConfig>,      // initial roster, in output order
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let dt = self.parameters.dt;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidStepSize(dt));
        }
        if self.parameters.steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        let mut seen = HashSet::new();
        for b in &self.bodies {
            if !(b.m.is_finite() && b.m > 0.0) {
                return Err(ConfigError::InvalidMass { name: b.name.clone(), mass: b.m });
            }
            if b.x.iter().chain(b.v.iter()).any(|c| !c.is_finite()) {
                return Err(ConfigError::NonFiniteState(b.name.clone()));
            }
            if !seen.insert(b.name.as_str()) {
                return Err(ConfigError::DuplicateName(b.name.clone()));
            }
        }
        Ok(())
    }

    /// Sun and the eight planets on the +x axis with circular-orbit speeds
    /// along +y, stepped a quarter day at a time for one year
    pub fn solar_system() -> Self {
        let bodies = vec![
            BodyConfig::new("Sun", 1.989e30, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            BodyConfig::new("Mercury", 3.285e23, [5.79e10, 0.0, 0.0], [0.0, 47870.0, 0.0]),
            BodyConfig::new("Venus", 4.867e24, [1.082e11, 0.0, 0.0], [0.0, 35020.0, 0.0]),
            BodyConfig::new("Earth", 5.972e24, [1.496e11, 0.0, 0.0], [0.0, 29780.0, 0.0]),
            BodyConfig::new("Mars", 6.417e23, [2.279e11, 0.0, 0.0], [0.0, 24070.0, 0.0]),
            BodyConfig::new("Jupiter", 1.898e27, [7.785e11, 0.0, 0.0], [0.0, 13070.0, 0.0]),
            BodyConfig::new("Saturn", 5.683e26, [1.433e12, 0.0, 0.0], [0.0, 9680.0, 0.0]),
            BodyConfig::new("Uranus", 8.681e25, [2.877e12, 0.0, 0.0], [0.0, 6800.0, 0.0]),
            BodyConfig::new("Neptune", 1.024e26, [4.503e12, 0.0, 0.0], [0.0, 5430.0, 0.0]),
        ];

        Self {
            parameters: ParametersConfig {
                dt: 86_400.0 / 4.0,
                steps: 365 * 4,
            },
            bodies,
        }
    }
}
