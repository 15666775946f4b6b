//! Traits describing the agent's collaborators.
//!
//! The decision core never owns the world. It reads sensor-derived knowledge
//! through [`BeliefGrid`], its own bookkeeping through [`AgentState`], and
//! submits primitives through [`WorldActions`]. Hosts implement all three,
//! usually on a single per-agent view type.
use crate::action::ActionError;
use crate::grid::{CellContent, CellKind, Coordinate, Direction, GridDimensions};

/// The agent's partial, sensor-derived knowledge of the grid.
pub trait BeliefGrid {
    fn dimensions(&self) -> GridDimensions;

    /// True if the agent currently believes `coordinate` cannot be entered.
    ///
    /// Coordinates outside the grid are reported as blocked.
    fn is_blocked(&self, coordinate: Coordinate) -> bool;

    /// Remembered contents of `coordinate`.
    fn content_at(&self, coordinate: Coordinate) -> CellContent;

    /// Closest object of `kind` to `from` among the cells currently in sensor range.
    fn nearest_of(&self, kind: CellKind, from: Coordinate) -> Option<Coordinate>;

    fn contains(&self, coordinate: Coordinate) -> bool {
        self.dimensions().contains(coordinate)
    }
}

/// Read-only view of the agent's own bookkeeping.
pub trait AgentState {
    fn position(&self) -> Coordinate;

    fn fuel_level(&self) -> u32;

    /// Number of objects currently carried.
    fn carried(&self) -> u32;

    /// Travel distance from the agent to `target`.
    fn distance_to(&self, target: Coordinate) -> u32 {
        self.position().manhattan(target)
    }
}

/// Primitive world calls. Each may be rejected by the environment.
pub trait WorldActions {
    fn move_agent(&mut self, direction: Direction) -> Result<(), ActionError>;

    fn collect(&mut self) -> Result<(), ActionError>;

    fn deposit(&mut self) -> Result<(), ActionError>;

    fn refuel(&mut self) -> Result<(), ActionError>;
}
