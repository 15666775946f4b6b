//! Host driver for tileworld agents.
//!
//! # Architecture
//!
//! ```text
//! Simulation (composition root)
//!   ├─→ GridWorld (ground truth, item spawning and expiry)
//!   ├─→ RegionPool (one exclusive slice per agent)
//!   ├─→ FuelRecord (shared fuel discovery)
//!   └─→ TileworldAgent × N (decision core, one per body)
//! ```
//!
//! Each tick every agent receives an [`AgentView`], a borrowed window that
//! implements the decision core's collaborator traits, and acts once.

mod builder;

pub mod config;
pub mod error;
pub mod simulation;
pub mod world;

pub use builder::SimulationBuilder;
pub use config::SimConfig;
pub use error::{ConfigError, SimError, WorldError};
pub use simulation::{AgentStats, AgentSummary, RunSummary, Simulation};
pub use world::{AgentBody, AgentView, GridWorld, WorldParams};
