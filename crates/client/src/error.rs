//! Errors raised while assembling a simulation.
use thiserror::Error;
use tileworld_core::{Coordinate, ErrorSeverity, TileworldError};
use tileworld_runtime::RegionError;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one cell (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("at least one agent is required")]
    NoAgents,

    #[error("{name} must be a probability (got {value})")]
    Probability { name: &'static str, value: f64 },

    #[error("item lifetime must be at least one tick")]
    ZeroLifetime,

    #[error("agents must be able to carry at least one object")]
    ZeroCapacity,

    #[error("refuel tolerance {tolerance} must exceed the fuel safety margin {margin}")]
    RefuelTolerance { tolerance: u32, margin: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("no free cell left to place {what}")]
    NoFreeCell { what: &'static str },

    #[error("cell {at} is outside the grid or not free")]
    Unplaceable { at: Coordinate },
}

/// Anything that can stop a simulation from being built.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("world generation failed: {0}")]
    World(#[from] WorldError),

    #[error("region assignment failed: {0}")]
    Region(#[from] RegionError),

    #[error("world has {world} agents but the configuration asks for {config}")]
    AgentCount { world: usize, config: usize },
}

impl TileworldError for SimError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SimError::Region(err) => err.severity(),
            SimError::Config(_) | SimError::World(_) | SimError::AgentCount { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SimError::Config(_) => "SIM_CONFIG",
            SimError::World(_) => "SIM_WORLD",
            SimError::Region(err) => err.error_code(),
            SimError::AgentCount { .. } => "SIM_AGENT_COUNT",
        }
    }
}
