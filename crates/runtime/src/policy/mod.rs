//! Goal arbitration.
//!
//! Arbitration runs once per tick and is memoryless: [`GoalSelector`] reads a
//! [`DecisionContext`] and returns a fresh [`Decision`], either an immediate
//! action for the current cell or a queue of goals to navigate to.

mod context;
mod goal;
mod selector;

pub use context::DecisionContext;
pub use goal::{Decision, Goal, GoalKind, GoalQueue};
pub use selector::{GoalSelector, local_interaction};
