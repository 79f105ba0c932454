//! Scenario configuration loaded from TOML.
//!
//! Every constant is fixed when the simulation is built. Body positions are
//! given in astronomical units, velocities in m/s:
//!
//! ```toml
//! time_step = 86400.0
//! mode = "sequential"      # or "simultaneous"
//! trail_capacity = 2000    # omit for unbounded trails
//!
//! [[bodies]]
//! name = "Sun"
//! position = [0.0, 0.0]
//! mass = 1.98892e30
//! radius = 30.0
//! color = [255, 255, 0]
//! primary = true
//!
//! [[bodies]]
//! name = "Earth"
//! position = [-1.0, 0.0]
//! velocity = [0.0, 29783.0]
//! mass = 5.9742e24
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use crate::{
    body::{Body, Color},
    error::{Result, SimError},
    simulation::{Constants, DegeneratePolicy, Simulation, UpdateMode},
    trail::TrailRetention,
};

fn default_g() -> f64 {
    Constants::G
}

fn default_au() -> f64 {
    Constants::AU
}

fn default_time_step() -> f64 {
    Simulation::DEFAULT_TIME_STEP
}

fn default_true() -> bool {
    true
}

fn default_radius() -> f64 {
    1.0
}

fn default_color() -> Color {
    Color::WHITE
}

/// Initial state of one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    /// Position in astronomical units.
    pub position: [f64; 2],
    /// Velocity in m/s.
    #[serde(default)]
    pub velocity: [f64; 2],
    /// Mass in kg.
    pub mass: f64,
    /// Display radius.
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default)]
    pub primary: bool,
}

impl BodyConfig {
    fn build(&self, au: f64, retention: TrailRetention) -> Result<Body> {
        let position = DVec2::new(self.position[0] * au, self.position[1] * au);
        let velocity = DVec2::new(self.velocity[0], self.velocity[1]);
        Ok(Body::new(self.name.clone(), position, velocity, self.mass)?
            .with_radius(self.radius)
            .with_color(self.color)
            .with_primary(self.primary)
            .with_trail(retention))
    }
}

/// Top-level scenario configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_g")]
    pub gravitational_constant: f64,
    /// Meters per unit of `bodies[].position`.
    #[serde(default = "default_au")]
    pub astronomical_unit: f64,
    /// Display units per meter; defaults to 150 per astronomical unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_scale: Option<f64>,
    /// Seconds advanced per step.
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// Maximum trail length per body; unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_capacity: Option<usize>,
    #[serde(default)]
    pub mode: UpdateMode,
    /// Fail a step when two bodies are at most `min_separation` apart.
    #[serde(default = "default_true")]
    pub reject_degenerate: bool,
    #[serde(default)]
    pub min_separation: f64,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: Constants::G,
            astronomical_unit: Constants::AU,
            display_scale: None,
            time_step: Simulation::DEFAULT_TIME_STEP,
            trail_capacity: None,
            mode: UpdateMode::default(),
            reject_degenerate: true,
            min_separation: 0.0,
            bodies: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading scenario from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Validates the configuration and builds the simulation it describes.
    pub fn build(&self) -> Result<Simulation> {
        let au = self.astronomical_unit;
        if !(au.is_finite() && au > 0.0) {
            return Err(SimError::InvalidConstant {
                name: "astronomical_unit",
                value: au,
            });
        }
        if !(self.min_separation.is_finite() && self.min_separation >= 0.0) {
            return Err(SimError::InvalidConstant {
                name: "min_separation",
                value: self.min_separation,
            });
        }
        let retention = TrailRetention::from_capacity(self.trail_capacity)
            .ok_or(SimError::ZeroTrailCapacity)?;

        let bodies = self
            .bodies
            .iter()
            .map(|b| b.build(au, retention))
            .collect::<Result<Vec<_>>>()?;

        let constants = Constants {
            gravitational_constant: self.gravitational_constant,
            display_scale: self.display_scale.unwrap_or(150.0 / au),
        };
        let policy = if self.reject_degenerate {
            DegeneratePolicy::Reject {
                min_separation: self.min_separation,
            }
        } else {
            DegeneratePolicy::Propagate
        };

        Ok(Simulation::new(bodies, self.time_step, constants)?
            .with_mode(self.mode)
            .with_degenerate_policy(policy))
    }
}
