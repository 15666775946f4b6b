//! Grid path planning.
//!
//! [`GridPlanner`] turns a goal coordinate into a [`Plan`] of single-step
//! directions using A* with a Manhattan heuristic. Search is restricted to
//! cells the belief grid does not mark as blocked and is capped at
//! `width + height` steps, so a goal made unreachable by stale or partial
//! obstacle knowledge fails fast instead of flooding the grid.

mod astar;
mod plan;

pub use astar::GridPlanner;
pub use plan::Plan;
