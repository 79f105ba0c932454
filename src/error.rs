//! Error types for orbit-sim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("body `{name}` has non-positive or non-finite mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("body `{name}` has a non-finite initial position or velocity")]
    NonFiniteState { name: String },

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("constant `{name}` is out of range: {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("more than one primary body: `{first}` and `{second}`")]
    MultiplePrimaries { first: String, second: String },

    #[error("trail capacity must be at least 1")]
    ZeroTrailCapacity,

    #[error("bodies `{body}` and `{other}` are {separation} m apart")]
    DegenerateGeometry {
        body: String,
        other: String,
        separation: f64,
    },

    #[error("no body at index {0}")]
    BodyIndex(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
