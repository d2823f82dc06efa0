//! Simulation settings. Only the rule path is exposed on the command line;
//! everything else uses the compiled-in defaults.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ParseMode;

pub const DEFAULT_RULE_PATH: &str = "rules.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub rule_path: PathBuf,
    pub width: usize,
    pub height: usize,
    /// Window pixels per cell along each axis
    pub cell_scale: u32,
    /// Chance that a cell starts alive
    pub live_probability: f64,
    /// Fixed seed for reproducible runs; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Row chunks per generation; `None` uses host parallelism
    pub workers: Option<usize>,
    pub parse_mode: ParseMode,
    pub updates_per_second: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("live probability {0} is outside [0, 1]")]
    LiveProbability(f64),
    #[error("grid dimensions {width}x{height} must be non-zero")]
    Dimensions { width: usize, height: usize },
    #[error("cell scale must be at least 1")]
    CellScale,
    #[error("worker count must be at least 1")]
    Workers,
    #[error("update rate {0} must be positive")]
    UpdateRate(f32),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rule_path: PathBuf::from(DEFAULT_RULE_PATH),
            width: 512,
            height: 384,
            cell_scale: 2,
            live_probability: 0.6,
            seed: None,
            workers: None,
            parse_mode: ParseMode::Permissive,
            updates_per_second: 60.0,
        }
    }
}

impl SimulationConfig {
    /// Override the rule path if one was given
    pub fn with_rule_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.rule_path = path;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.live_probability) {
            return Err(ConfigError::LiveProbability(self.live_probability));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Dimensions { width: self.width, height: self.height });
        }
        if self.cell_scale == 0 {
            return Err(ConfigError::CellScale);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Workers);
        }
        if !(self.updates_per_second > 0.0) {
            return Err(ConfigError::UpdateRate(self.updates_per_second));
        }
        Ok(())
    }
}
