//! Decision and navigation core for tileworld agents.
//!
//! The crate turns percepts into one primitive action per tick. It owns no
//! world state: hosts implement the collaborator traits from
//! [`tileworld_core`] and drive [`TileworldAgent::tick`] once per agent per
//! simulated tick.
//!
//! Modules are organized by responsibility:
//! - [`agent`] runs the per-tick decision/action cycle
//! - [`policy`] arbitrates between refuelling, tasks and exploration
//! - [`planner`] finds depth-bounded shortest paths on the belief grid
//! - [`coverage`] generates patrol routes and hands out exclusive regions
//! - [`fuel`] shares the fuel resource's location between agents
pub mod agent;
pub mod coverage;
pub mod error;
pub mod fuel;
pub mod planner;
pub mod policy;

#[cfg(test)]
mod test_helpers;

pub use agent::{TickOutcome, TileworldAgent, boundary_fallback};
pub use coverage::{Region, RegionClaim, RegionPool, sweep_waypoints};
pub use error::{GoalError, PlanError, RegionError};
pub use fuel::FuelRecord;
pub use planner::{GridPlanner, Plan};
pub use policy::{
    Decision, DecisionContext, Goal, GoalKind, GoalQueue, GoalSelector, local_interaction,
};
