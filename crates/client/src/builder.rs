//! Simulation builder.

use std::sync::Arc;

use tileworld_runtime::{FuelRecord, RegionPool, TileworldAgent};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::simulation::{AgentStats, Simulation};
use crate::world::{GridWorld, WorldParams};

/// Builder for a [`Simulation`].
///
/// The configuration is required. A pre-built world is optional; without one
/// a world is generated from the configuration's seed.
pub struct SimulationBuilder {
    config: SimConfig,
    world: Option<GridWorld>,
}

impl SimulationBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            world: None,
        }
    }

    /// Use `world` instead of generating one. Its agent count must match the
    /// configuration.
    pub fn world(mut self, world: GridWorld) -> Self {
        self.world = Some(world);
        self
    }

    /// Build the Simulation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration fails validation
    /// - world generation cannot place every agent
    /// - the grid is too narrow to give every agent a region
    /// - a supplied world has the wrong number of agents
    pub fn build(self) -> Result<Simulation, SimError> {
        let config = self.config;
        config.validate()?;

        let world = match self.world {
            Some(world) => world,
            None => GridWorld::generate(WorldParams::from_config(&config), config.agents)?,
        };
        if world.agent_count() != config.agents {
            return Err(SimError::AgentCount {
                world: world.agent_count(),
                config: config.agents,
            });
        }

        let dims = world.dimensions();
        let pool = Arc::new(RegionPool::new(
            dims,
            config.agents,
            config.agent.sensor_radius,
        )?);
        let fuel = Arc::new(FuelRecord::new());

        let agents = (0..config.agents)
            .map(|index| {
                let claim = pool.claim()?;
                tracing::debug!(
                    "agent-{} patrols columns {:?}",
                    index,
                    claim.region().bounds()
                );
                Ok(TileworldAgent::new(
                    format!("agent-{index}"),
                    claim,
                    Arc::clone(&fuel),
                    config.agent.clone(),
                    dims,
                ))
            })
            .collect::<Result<Vec<_>, SimError>>()?;

        Ok(Simulation {
            stats: vec![AgentStats::default(); agents.len()],
            config,
            world,
            pool,
            fuel,
            agents,
        })
    }
}
