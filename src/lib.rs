pub mod body;
pub mod c_api;
pub mod config;
pub mod conservation;
pub mod error;
pub mod render;
pub mod simulation;
pub mod trail;
pub mod utils;

pub use body::{Body, Color};
pub use config::{BodyConfig, SimulationConfig};
pub use error::{Result, SimError};
pub use render::{BodyView, Frame, Renderer};
pub use simulation::{Constants, DegeneratePolicy, Simulation, UpdateMode};
pub use trail::{Trail, TrailRetention};
pub use ultraviolet::DVec2;
