//! Decision context for goal arbitration.
//!
//! [`DecisionContext`] is the "blackboard" arbitration reads from. It bundles
//! the agent's belief grid, its own bookkeeping, the shared fuel record and
//! the agent configuration for the duration of a single tick.
use tileworld_core::{AgentConfig, AgentState, BeliefGrid, CellContent, CellKind, Coordinate};

use crate::fuel::FuelRecord;

/// Read-only inputs to one arbitration step.
///
/// The `'a` lifetime ties the context to the borrowed percepts, which only
/// stay valid for the current tick.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    pub belief: &'a dyn BeliefGrid,
    pub agent: &'a dyn AgentState,
    pub fuel: &'a FuelRecord,
    pub config: &'a AgentConfig,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        belief: &'a dyn BeliefGrid,
        agent: &'a dyn AgentState,
        fuel: &'a FuelRecord,
        config: &'a AgentConfig,
    ) -> Self {
        Self {
            belief,
            agent,
            fuel,
            config,
        }
    }

    pub fn position(&self) -> Coordinate {
        self.agent.position()
    }

    /// Contents of the cell the agent stands on.
    pub fn local_content(&self) -> CellContent {
        self.belief.content_at(self.position())
    }

    pub fn fuel_location(&self) -> Option<Coordinate> {
        self.fuel.location()
    }

    pub fn is_carrying(&self) -> bool {
        self.agent.carried() > 0
    }

    pub fn has_capacity(&self) -> bool {
        self.agent.carried() < self.config.max_carried
    }

    /// Whether standing on a fuel resource is worth a refuel.
    pub fn wants_refuel(&self) -> bool {
        self.agent.fuel_level() < self.config.refuel_tolerance
    }

    /// Whether the agent must head for fuel at `station` now.
    ///
    /// True below the absolute threshold, or when the fuel left after
    /// travelling to `station` would drop under the safety margin.
    pub fn fuel_emergency(&self, station: Coordinate) -> bool {
        let fuel = self.agent.fuel_level();
        if fuel < self.config.fuel_threshold {
            return true;
        }
        let remaining = i64::from(fuel) - i64::from(self.agent.distance_to(station));
        remaining < i64::from(self.config.fuel_safety_margin)
    }

    /// Nearest sensed object of `kind`.
    pub fn nearest(&self, kind: CellKind) -> Option<Coordinate> {
        self.belief.nearest_of(kind, self.position())
    }
}

impl std::fmt::Debug for DecisionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionContext")
            .field("position", &self.position())
            .field("fuel_level", &self.agent.fuel_level())
            .field("carried", &self.agent.carried())
            .field("fuel_location", &self.fuel_location())
            .finish()
    }
}
