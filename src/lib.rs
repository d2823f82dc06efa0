// Domain layer - rule model, parser, grid engine, scheduler
pub mod domain;

// Application layer - configuration and frame-loop coordination
pub mod application;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, EvolutionRules, Grid, Neighborhood, Rule, Scheduler};
pub use application::{Simulation, SimulationConfig};
