//! Depth-bounded A* over the agent's belief grid.
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use tileworld_core::{BeliefGrid, Coordinate, Direction, GridDimensions};

use super::Plan;
use crate::error::PlanError;

/// Open-set entry. Field order is the comparison order: lowest estimated
/// total first, then closest to the goal, then earliest inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    estimate: u32,
    remaining: u32,
    sequence: u64,
    index: usize,
}

/// Best-first search from a start cell to a goal cell.
///
/// The planner is stateless between calls; it only remembers the grid
/// dimensions and its depth cap. Every call allocates fresh search buffers
/// sized to the grid.
#[derive(Clone, Copy, Debug)]
pub struct GridPlanner {
    dims: GridDimensions,
    max_depth: u32,
}

impl GridPlanner {
    /// Creates a planner whose depth cap is `width + height`.
    pub fn new(dims: GridDimensions) -> Self {
        Self {
            dims,
            max_depth: dims.search_depth(),
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Computes the shortest cardinal path from `start` to `goal`.
    ///
    /// Cells the belief grid reports as blocked are never entered; the start
    /// cell itself is exempt since the agent already occupies it. Paths
    /// longer than [`GridPlanner::max_depth`] are not explored.
    ///
    /// # Errors
    ///
    /// - [`PlanError::OutOfBounds`] if either endpoint lies outside the grid
    /// - [`PlanError::GoalBlocked`] if the goal cell is believed blocked
    /// - [`PlanError::NoPath`] if the reachable area within the depth cap
    ///   does not contain the goal
    pub fn plan(
        &self,
        start: Coordinate,
        goal: Coordinate,
        belief: &dyn BeliefGrid,
    ) -> Result<Plan, PlanError> {
        let start_index = self
            .dims
            .index(start)
            .ok_or(PlanError::OutOfBounds { coordinate: start })?;
        let goal_index = self
            .dims
            .index(goal)
            .ok_or(PlanError::OutOfBounds { coordinate: goal })?;

        if start_index == goal_index {
            return Ok(Plan::arrived(start));
        }
        if belief.is_blocked(goal) {
            return Err(PlanError::GoalBlocked { goal });
        }

        let cells = self.dims.cell_count();
        let mut cost = vec![u32::MAX; cells];
        let mut parent: Vec<Option<(usize, Direction)>> = vec![None; cells];
        let mut closed = vec![false; cells];
        let mut open = BinaryHeap::new();
        let mut sequence = 0u64;
        let mut expanded = 0usize;

        cost[start_index] = 0;
        let remaining = start.manhattan(goal);
        open.push(Reverse(OpenNode {
            estimate: remaining,
            remaining,
            sequence,
            index: start_index,
        }));

        while let Some(Reverse(node)) = open.pop() {
            if closed[node.index] {
                continue;
            }
            closed[node.index] = true;

            if node.index == goal_index {
                let steps = Self::reconstruct(&parent, start_index, goal_index);
                tracing::trace!(
                    "planner: {} -> {} in {} steps ({} expanded)",
                    start,
                    goal,
                    steps.len(),
                    expanded
                );
                return Ok(Plan::new(start, goal, steps));
            }

            expanded += 1;
            let depth = cost[node.index];
            if depth >= self.max_depth {
                continue;
            }

            let here = self.dims.coordinate(node.index);
            for direction in Direction::CARDINAL {
                let next = here.offset(direction);
                let Some(next_index) = self.dims.index(next) else {
                    continue;
                };
                if closed[next_index] || belief.is_blocked(next) {
                    continue;
                }

                let next_cost = depth + 1;
                if next_cost >= cost[next_index] {
                    continue;
                }
                cost[next_index] = next_cost;
                parent[next_index] = Some((node.index, direction));

                sequence += 1;
                let remaining = next.manhattan(goal);
                open.push(Reverse(OpenNode {
                    estimate: next_cost + remaining,
                    remaining,
                    sequence,
                    index: next_index,
                }));
            }
        }

        Err(PlanError::NoPath {
            start,
            goal,
            max_depth: self.max_depth,
            expanded,
        })
    }

    fn reconstruct(
        parent: &[Option<(usize, Direction)>],
        start_index: usize,
        goal_index: usize,
    ) -> VecDeque<Direction> {
        let mut steps = VecDeque::new();
        let mut cursor = goal_index;
        while cursor != start_index {
            match parent[cursor] {
                Some((previous, direction)) => {
                    steps.push_front(direction);
                    cursor = previous;
                }
                None => break,
            }
        }
        steps
    }
}
