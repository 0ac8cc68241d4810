use super::bounds::Bounds;
use super::driver::Simulation;
use super::error::SimError;
use super::integrator::Integrator;
use super::params::SimulationParams;
use super::scenario::Scenario;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const DEFAULT_CONFIG_JSON: &str = include_str!("../../assets/default_sim.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

/// Startup configuration: a scenario plus optional overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub scenario: Scenario,
    pub params: Option<SimulationParams>,
    pub integrator: Option<Integrator>,
    pub grid: Option<GridSize>,
    pub bounds: Option<Bounds>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(SimError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "cannot read config: {}", err),
            ConfigError::Parse(err) => write!(f, "malformed config: {}", err),
            ConfigError::Invalid(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<SimError> for ConfigError {
    fn from(err: SimError) -> Self {
        ConfigError::Invalid(err)
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The config shipped with the binary
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json_str(DEFAULT_CONFIG_JSON)
    }

    /// Build the simulation this config describes. Every override is
    /// validated, nothing is silently clamped.
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        let mut simulation = Simulation::from_scenario(self.scenario)?;

        if let Some(params) = self.params {
            simulation.set_params(params)?;
        }
        if let Some(grid) = self.grid {
            simulation.resize_grid(grid.rows, grid.cols)?;
        }
        if let Some(integrator) = self.integrator {
            simulation.set_integrator(integrator);
        }
        if self.bounds.is_some() {
            simulation.set_bounds(self.bounds)?;
        }

        Ok(simulation)
    }
}
