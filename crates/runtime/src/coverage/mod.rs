//! Region coverage for exploration.
//!
//! Each agent patrols one exclusive vertical slice of the grid. The slice is
//! swept by a serpentine route of waypoints spaced so that a square sensor of
//! the configured radius sees every column of the slice on every pass.
//!
//! - [`sweep_waypoints`] generates the route
//! - [`Region`] cycles through it and validates waypoints against the belief grid
//! - [`RegionPool`] hands out slices so no two agents patrol the same columns

mod pool;
mod region;
mod sweep;

pub use pool::{RegionClaim, RegionPool};
pub use region::Region;
pub use sweep::sweep_waypoints;
