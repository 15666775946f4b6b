//! Per-agent patrol region and waypoint cycling.
use tileworld_core::{BeliefGrid, Coordinate, GridDimensions};

use super::sweep_waypoints;
use crate::error::{GoalError, RegionError};

/// An exclusive vertical slice of the grid together with its patrol route.
///
/// The route is cyclic: [`Region::advance`] past the last waypoint returns to
/// the first one. The region itself never changes shape after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    lo: i32,
    hi: i32,
    dims: GridDimensions,
    waypoints: Vec<Coordinate>,
    cursor: usize,
}

impl Region {
    /// Builds the region covering columns `[lo, hi]` for a sensor of `radius`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::EmptySlice`] if `lo > hi`
    /// - [`RegionError::OutOfBounds`] if the slice leaves the grid or the grid
    ///   has no rows
    pub fn new(lo: i32, hi: i32, radius: u32, dims: GridDimensions) -> Result<Self, RegionError> {
        if lo > hi {
            return Err(RegionError::EmptySlice { lo, hi });
        }
        if lo < 0 || hi >= dims.width as i32 || dims.height == 0 {
            return Err(RegionError::OutOfBounds {
                lo,
                hi,
                width: dims.width,
            });
        }

        let waypoints = sweep_waypoints(lo, hi, radius, dims);
        if waypoints.is_empty() {
            return Err(RegionError::EmptySlice { lo, hi });
        }

        Ok(Self {
            lo,
            hi,
            dims,
            waypoints,
            cursor: 0,
        })
    }

    /// Inclusive column bounds of the slice.
    pub fn bounds(&self) -> (i32, i32) {
        (self.lo, self.hi)
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    /// The waypoint currently being patrolled towards.
    pub fn current(&self) -> Coordinate {
        self.waypoints[self.cursor]
    }

    /// Moves on to the next waypoint, wrapping after the last one.
    pub fn advance(&mut self) -> Coordinate {
        self.cursor = (self.cursor + 1) % self.waypoints.len();
        self.current()
    }

    /// Turns a waypoint into an enterable goal.
    ///
    /// A blocked waypoint is shifted one row at a time toward the vertical
    /// centre of the grid (up from the lower half, down from the upper half).
    /// The scan continues to the far edge of the column and so checks at most
    /// `height` cells.
    ///
    /// # Errors
    ///
    /// - [`GoalError::OutOfBounds`] if `waypoint` is not on the grid
    /// - [`GoalError::ColumnBlocked`] if every scanned cell is blocked
    pub fn resolve(
        &self,
        waypoint: Coordinate,
        belief: &dyn BeliefGrid,
    ) -> Result<Coordinate, GoalError> {
        if !self.dims.contains(waypoint) {
            return Err(GoalError::OutOfBounds { waypoint });
        }
        if !belief.is_blocked(waypoint) {
            return Ok(waypoint);
        }

        let step = if waypoint.y < self.dims.vertical_center() {
            1
        } else {
            -1
        };
        let mut candidate = waypoint;
        loop {
            candidate.y += step;
            if !self.dims.contains(candidate) {
                break;
            }
            if !belief.is_blocked(candidate) {
                return Ok(candidate);
            }
        }

        Err(GoalError::ColumnBlocked {
            waypoint,
            column: waypoint.x,
        })
    }

    /// Patrol goal for an agent at `position`.
    ///
    /// Reaching the (resolved) current waypoint retires it, so the next one
    /// becomes the goal in the same tick.
    pub fn patrol_target(&mut self, position: Coordinate, belief: &dyn BeliefGrid) -> Coordinate {
        let target = self.resolve_or_degrade(self.current(), belief);
        if target != position {
            return target;
        }

        let next = self.advance();
        tracing::debug!("region [{}, {}]: waypoint reached, next {}", self.lo, self.hi, next);
        self.resolve_or_degrade(next, belief)
    }

    fn resolve_or_degrade(&self, waypoint: Coordinate, belief: &dyn BeliefGrid) -> Coordinate {
        match self.resolve(waypoint, belief) {
            Ok(goal) => goal,
            Err(err) => {
                tracing::warn!("region [{}, {}]: {}; keeping waypoint", self.lo, self.hi, err);
                waypoint
            }
        }
    }
}
