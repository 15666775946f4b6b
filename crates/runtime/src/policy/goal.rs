//! Goal definitions produced by arbitration.
//!
//! Goals are values: arbitration builds a fresh [`GoalQueue`] every tick and
//! nothing carries over to the next one.
use arrayvec::ArrayVec;
use tileworld_core::{Action, Coordinate};

/// Why the agent is heading somewhere.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum GoalKind {
    /// Patrol while the fuel resource is still unknown.
    Explore,
    /// Head for the known fuel resource.
    Refuel,
    /// Head for the nearest sensed disposal site.
    Deposit,
    /// Head for the nearest sensed collectible.
    Collect,
    /// Nothing better to do: continue the region sweep.
    Patrol,
}

impl GoalKind {
    /// Whether the target comes from the region patrol route.
    pub const fn is_waypoint(self) -> bool {
        matches!(self, GoalKind::Explore | GoalKind::Patrol)
    }
}

/// A target coordinate together with the reason for going there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Goal {
    pub kind: GoalKind,
    pub target: Coordinate,
}

impl Goal {
    pub const fn new(kind: GoalKind, target: Coordinate) -> Self {
        Self { kind, target }
    }
}

const QUEUE_CAPACITY: usize = 4;

/// Pending goals in priority order; only the head is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalQueue {
    goals: ArrayVec<Goal, QUEUE_CAPACITY>,
}

impl GoalQueue {
    pub const CAPACITY: usize = QUEUE_CAPACITY;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(goal: Goal) -> Self {
        let mut queue = Self::new();
        queue.push(goal);
        queue
    }

    /// Appends `goal`. Returns `false` if the queue is already full.
    pub fn push(&mut self, goal: Goal) -> bool {
        self.goals.try_push(goal).is_ok()
    }

    /// The active goal.
    pub fn head(&self) -> Option<&Goal> {
        self.goals.first()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn clear(&mut self) {
        self.goals.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }
}

/// Outcome of one arbitration step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Act on the current cell right away; no planning this tick.
    Act(Action),
    /// Navigate toward the head of the queue.
    Pursue(GoalQueue),
}

impl Decision {
    pub fn pursue(goal: Goal) -> Self {
        Decision::Pursue(GoalQueue::single(goal))
    }

    /// The active goal, if this decision navigates.
    pub fn goal(&self) -> Option<&Goal> {
        match self {
            Decision::Act(_) => None,
            Decision::Pursue(queue) => queue.head(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_bounded() {
        let goal = Goal::new(GoalKind::Patrol, Coordinate::new(1, 1));
        let mut queue = GoalQueue::new();
        for _ in 0..GoalQueue::CAPACITY {
            assert!(queue.push(goal));
        }
        assert!(!queue.push(goal));
        assert_eq!(queue.len(), GoalQueue::CAPACITY);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.head(), None);
    }

    #[test]
    fn head_is_first_pushed() {
        let first = Goal::new(GoalKind::Refuel, Coordinate::new(0, 0));
        let second = Goal::new(GoalKind::Patrol, Coordinate::new(5, 5));
        let mut queue = GoalQueue::single(first);
        queue.push(second);
        assert_eq!(queue.head(), Some(&first));
        assert_eq!(queue.iter().count(), 2);
    }

    #[test]
    fn decision_exposes_active_goal() {
        let goal = Goal::new(GoalKind::Collect, Coordinate::new(2, 3));
        assert_eq!(Decision::pursue(goal).goal(), Some(&goal));
        assert_eq!(Decision::Act(Action::Collect).goal(), None);
        assert_eq!(GoalKind::Deposit.to_string(), "deposit");
        assert!(GoalKind::Explore.is_waypoint());
        assert!(!GoalKind::Refuel.is_waypoint());
    }
}
