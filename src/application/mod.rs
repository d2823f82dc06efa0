mod config;
mod simulation;

pub use config::{ConfigError, DEFAULT_RULE_PATH, SimulationConfig};
pub use simulation::Simulation;
