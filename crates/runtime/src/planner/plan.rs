//! Consumable step sequences produced by the planner.
use std::collections::VecDeque;

use tileworld_core::{Coordinate, Direction};

/// Ordered directions leading from `start` to `goal`, excluding the start cell.
///
/// A plan is a value: the agent that requested it owns it exclusively and
/// discards it at the end of the tick. Steps are consumed from the front with
/// [`Plan::pop_next`]; check [`Plan::is_empty`] first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    start: Coordinate,
    goal: Coordinate,
    steps: VecDeque<Direction>,
}

impl Plan {
    pub(crate) fn new(start: Coordinate, goal: Coordinate, steps: VecDeque<Direction>) -> Self {
        Self { start, goal, steps }
    }

    /// A plan for an agent already standing on its goal.
    pub fn arrived(at: Coordinate) -> Self {
        Self::new(at, at, VecDeque::new())
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    /// Number of steps left.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn peek(&self) -> Option<Direction> {
        self.steps.front().copied()
    }

    /// Removes and returns the next step.
    pub fn pop_next(&mut self) -> Option<Direction> {
        self.steps.pop_front()
    }

    pub fn steps(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().copied()
    }

    /// Cell reached by walking the remaining steps from `from`.
    pub fn destination_from(&self, from: Coordinate) -> Coordinate {
        self.steps().fold(from, Coordinate::offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrived_plan_is_empty() {
        let mut plan = Plan::arrived(Coordinate::new(3, 3));
        assert!(plan.is_empty());
        assert_eq!(plan.peek(), None);
        assert_eq!(plan.pop_next(), None);
        assert_eq!(plan.goal(), plan.start());
    }

    #[test]
    fn steps_are_consumed_in_order() {
        let start = Coordinate::new(0, 0);
        let goal = Coordinate::new(1, 1);
        let mut plan = Plan::new(
            start,
            goal,
            VecDeque::from([Direction::North, Direction::East]),
        );

        assert_eq!(plan.destination_from(start), goal);
        assert_eq!(plan.pop_next(), Some(Direction::North));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.destination_from(Coordinate::new(0, 1)), goal);
        assert_eq!(plan.pop_next(), Some(Direction::East));
        assert!(plan.is_empty());
    }
}
