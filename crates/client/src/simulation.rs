//! Turn-based simulation driver.
use std::sync::Arc;

use serde::Serialize;
use tileworld_core::{Action, Coordinate};
use tileworld_runtime::{FuelRecord, RegionPool, TileworldAgent};

use crate::builder::SimulationBuilder;
use crate::config::SimConfig;
use crate::world::GridWorld;

/// Per-agent counters accumulated over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AgentStats {
    pub moves: u64,
    pub idles: u64,
    pub collects: u64,
    pub deposits: u64,
    pub refuels: u64,
    pub rejections: u64,
}

impl AgentStats {
    fn record(&mut self, action: Action, rejected: bool) {
        if rejected {
            self.rejections += 1;
            return;
        }
        match action {
            Action::Move(direction) if direction.is_idle() => self.idles += 1,
            Action::Move(_) => self.moves += 1,
            Action::Collect => self.collects += 1,
            Action::Deposit => self.deposits += 1,
            Action::Refuel => self.refuels += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub region: (i32, i32),
    pub position: Coordinate,
    pub fuel: u32,
    pub carried: u32,
    pub stats: AgentStats,
}

/// Serialisable outcome of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub ticks: u64,
    pub score: u32,
    pub fuel_station: Coordinate,
    pub fuel_discovered: Option<Coordinate>,
    pub agents: Vec<AgentSummary>,
}

/// A world, its agents and the shared state between them.
///
/// Agents act in index order; each one sees the world as left by the agents
/// before it in the same tick.
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) world: GridWorld,
    pub(crate) pool: Arc<RegionPool>,
    pub(crate) fuel: Arc<FuelRecord>,
    pub(crate) agents: Vec<TileworldAgent>,
    pub(crate) stats: Vec<AgentStats>,
}

impl Simulation {
    pub fn builder(config: SimConfig) -> SimulationBuilder {
        SimulationBuilder::new(config)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn pool(&self) -> &Arc<RegionPool> {
        &self.pool
    }

    pub fn fuel(&self) -> &FuelRecord {
        &self.fuel
    }

    pub fn agents(&self) -> &[TileworldAgent] {
        &self.agents
    }

    /// Runs one tick: every agent acts once, then the world advances.
    pub fn step(&mut self) {
        for (index, agent) in self.agents.iter_mut().enumerate() {
            let Some(mut view) = self.world.view(index) else {
                tracing::warn!("[{}] has no body in the world", agent.name());
                continue;
            };
            let outcome = agent.tick(&mut view);
            if let Some(stats) = self.stats.get_mut(index) {
                stats.record(outcome.action, !outcome.succeeded());
            }
        }
        self.world.advance_tick();
    }

    /// Runs the configured number of ticks and summarises the result.
    pub fn run(&mut self) -> RunSummary {
        let ticks = self.config.ticks;
        let progress_every = (ticks / 10).max(1);
        tracing::info!(
            "running {} agents for {} ticks (seed {})",
            self.agents.len(),
            ticks,
            self.config.seed
        );

        for _ in 0..ticks {
            self.step();
            let tick = self.world.tick();
            if tick % progress_every == 0 {
                tracing::debug!("tick {}/{}: score {}", tick, ticks, self.world.score());
            }
        }

        let summary = self.summary();
        tracing::info!(
            "finished after {} ticks: score {}, fuel resource {}",
            summary.ticks,
            summary.score,
            if summary.fuel_discovered.is_some() {
                "found"
            } else {
                "never found"
            }
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        let agents = self
            .agents
            .iter()
            .enumerate()
            .filter_map(|(index, agent)| {
                let body = self.world.body(index)?;
                Some(AgentSummary {
                    name: agent.name().to_string(),
                    region: agent.claim().region().bounds(),
                    position: body.position,
                    fuel: body.fuel,
                    carried: body.carried,
                    stats: self.stats.get(index).cloned().unwrap_or_default(),
                })
            })
            .collect();

        RunSummary {
            seed: self.config.seed,
            width: self.config.width,
            height: self.config.height,
            ticks: self.world.tick(),
            score: self.world.score(),
            fuel_station: self.world.fuel_station(),
            fuel_discovered: self.fuel.location(),
            agents,
        }
    }
}
