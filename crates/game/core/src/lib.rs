//! Shared vocabulary for tileworld agents.
//!
//! `tileworld-core` defines the grid geometry, the primitive actions an agent
//! can emit, and the collaborator traits through which the decision runtime
//! sees the world. It performs no I/O and keeps no state of its own; hosts and
//! the runtime both depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod grid;

pub use action::{Action, ActionError};
pub use config::AgentConfig;
pub use env::{AgentState, BeliefGrid, WorldActions};
pub use error::{ErrorSeverity, TileworldError};
pub use grid::{CellContent, CellKind, Coordinate, Direction, GridDimensions, ObjectId};
