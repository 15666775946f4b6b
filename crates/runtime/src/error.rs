//! Error types surfaced by the decision runtime.
//!
//! None of these escape [`crate::TileworldAgent::tick`]: the cycle converts
//! each into a fallback action. They are public so hosts and tests can call
//! the planner and the coverage generator directly.
use thiserror::Error;
use tileworld_core::{Coordinate, ErrorSeverity, TileworldError};

/// Path search could not produce a plan (PlanningFailure).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("coordinate {coordinate} is outside the grid")]
    OutOfBounds { coordinate: Coordinate },

    #[error("goal {goal} is blocked")]
    GoalBlocked { goal: Coordinate },

    #[error("no path from {start} to {goal} within depth {max_depth} ({expanded} cells expanded)")]
    NoPath {
        start: Coordinate,
        goal: Coordinate,
        max_depth: u32,
        expanded: usize,
    },
}

impl TileworldError for PlanError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PlanError::OutOfBounds { .. } => ErrorSeverity::Validation,
            PlanError::GoalBlocked { .. } | PlanError::NoPath { .. } => ErrorSeverity::Degraded,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PlanError::OutOfBounds { .. } => "PLAN_OUT_OF_BOUNDS",
            PlanError::GoalBlocked { .. } => "PLAN_GOAL_BLOCKED",
            PlanError::NoPath { .. } => "PLAN_NO_PATH",
        }
    }
}

/// A waypoint could not be turned into a usable goal (InvalidGoal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("waypoint {waypoint} is outside the grid")]
    OutOfBounds { waypoint: Coordinate },

    #[error("column {column} is blocked from {waypoint} to the grid edge")]
    ColumnBlocked { waypoint: Coordinate, column: i32 },
}

impl TileworldError for GoalError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Degraded
    }

    fn error_code(&self) -> &'static str {
        match self {
            GoalError::OutOfBounds { .. } => "GOAL_OUT_OF_BOUNDS",
            GoalError::ColumnBlocked { .. } => "GOAL_COLUMN_BLOCKED",
        }
    }
}

/// Region construction or assignment failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("slice [{lo}, {hi}] is empty")]
    EmptySlice { lo: i32, hi: i32 },

    #[error("slice [{lo}, {hi}] exceeds grid width {width}")]
    OutOfBounds { lo: i32, hi: i32, width: u32 },

    #[error("region pool needs at least one agent")]
    NoAgents,

    #[error("{agents} agents cannot share a grid {width} columns wide")]
    TooManyAgents { agents: usize, width: u32 },

    #[error("all {slots} regions are already claimed")]
    Exhausted { slots: usize },
}

impl TileworldError for RegionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegionError::EmptySlice { .. } => "REGION_EMPTY_SLICE",
            RegionError::OutOfBounds { .. } => "REGION_OUT_OF_BOUNDS",
            RegionError::NoAgents => "REGION_NO_AGENTS",
            RegionError::TooManyAgents { .. } => "REGION_TOO_MANY_AGENTS",
            RegionError::Exhausted { .. } => "REGION_EXHAUSTED",
        }
    }
}
