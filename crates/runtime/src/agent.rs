//! Per-tick decision/action cycle.
//!
//! [`TileworldAgent`] ties arbitration, planning and plan execution together.
//! Each tick it:
//! 1. Publishes a sensed fuel resource to the shared [`FuelRecord`]
//! 2. Runs [`GoalSelector`] for an immediate action or a goal
//! 3. Plans to the goal and takes the first step of the plan
//! 4. Submits the resulting primitive to the world
//!
//! Nothing but the region cursor survives between ticks; plans and goals are
//! rebuilt from scratch every time.
use std::sync::Arc;

use tileworld_core::{
    Action, ActionError, AgentConfig, AgentState, BeliefGrid, CellKind, Coordinate, Direction,
    GridDimensions, TileworldError, WorldActions,
};

use crate::coverage::RegionClaim;
use crate::fuel::FuelRecord;
use crate::planner::GridPlanner;
use crate::policy::{Decision, DecisionContext, GoalSelector};

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// The action the agent attempted.
    pub action: Action,
    /// Set if the world refused the action.
    pub rejection: Option<ActionError>,
}

impl TickOutcome {
    pub fn succeeded(&self) -> bool {
        self.rejection.is_none()
    }
}

/// A reactive tileworld agent.
#[derive(Debug)]
pub struct TileworldAgent {
    name: String,
    claim: RegionClaim,
    fuel: Arc<FuelRecord>,
    config: AgentConfig,
    planner: GridPlanner,
}

impl TileworldAgent {
    pub fn new(
        name: impl Into<String>,
        claim: RegionClaim,
        fuel: Arc<FuelRecord>,
        config: AgentConfig,
        dims: GridDimensions,
    ) -> Self {
        Self {
            name: name.into(),
            claim,
            fuel,
            config,
            planner: GridPlanner::new(dims),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn claim(&self) -> &RegionClaim {
        &self.claim
    }

    pub fn fuel_record(&self) -> &Arc<FuelRecord> {
        &self.fuel
    }

    /// Chooses the action for this tick without touching the world.
    pub fn think(&mut self, belief: &dyn BeliefGrid, state: &dyn AgentState) -> Action {
        let position = state.position();

        if let Some(station) = belief.nearest_of(CellKind::FuelResource, position)
            && self.fuel.record(station)
        {
            tracing::info!("[{}] reported fuel resource at {}", self.name, station);
        }

        let ctx = DecisionContext::new(belief, state, &self.fuel, &self.config);
        let queue = match GoalSelector::select(&ctx, self.claim.region_mut()) {
            Decision::Act(action) => return action,
            Decision::Pursue(queue) => queue,
        };
        let Some(&goal) = queue.head() else {
            return Action::IDLE;
        };

        match self.planner.plan(position, goal.target, belief) {
            Ok(mut plan) => Action::Move(plan.pop_next().unwrap_or(Direction::Idle)),
            Err(err) => {
                let direction = boundary_fallback(position, belief, self.planner.dimensions());
                tracing::debug!(
                    "[{}] {} goal {} unreachable ({}); fallback {}",
                    self.name,
                    goal.kind,
                    goal.target,
                    err,
                    direction
                );
                // An unreachable waypoint would otherwise hold the patrol forever.
                if goal.kind.is_waypoint() {
                    let next = self.claim.region_mut().advance();
                    tracing::debug!("[{}] skipping to waypoint {}", self.name, next);
                }
                Action::Move(direction)
            }
        }
    }

    /// Submits `action` to the world.
    pub fn act(&self, world: &mut dyn WorldActions, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Move(Direction::Idle) => Ok(()),
            Action::Move(direction) => world.move_agent(direction),
            Action::Collect => world.collect(),
            Action::Deposit => world.deposit(),
            Action::Refuel => world.refuel(),
        }
    }

    /// Runs one full decision/action cycle.
    ///
    /// A rejected action is logged and skipped; the next tick re-plans from
    /// the agent's actual position.
    pub fn tick<E>(&mut self, env: &mut E) -> TickOutcome
    where
        E: BeliefGrid + AgentState + WorldActions,
    {
        let action = self.think(&*env, &*env);
        let rejection = self.act(env, action).err();

        if let Some(err) = &rejection {
            if err.severity().is_recoverable() {
                tracing::debug!("[{}] {} rejected: {}", self.name, action.label(), err);
            } else {
                tracing::warn!(
                    "[{}] {} rejected: {} ({})",
                    self.name,
                    action.label(),
                    err,
                    err.error_code()
                );
            }
        }

        TickOutcome { action, rejection }
    }
}

/// Direction to take when no plan to the goal exists.
///
/// Steps away from the grid edge nearest to `position` (ties broken west,
/// east, south, north). If that cell is blocked, the first open cardinal
/// neighbour is used instead; a fully boxed-in agent idles.
pub fn boundary_fallback(
    position: Coordinate,
    belief: &dyn BeliefGrid,
    dims: GridDimensions,
) -> Direction {
    let west = position.x;
    let east = dims.width as i32 - 1 - position.x;
    let south = position.y;
    let north = dims.height as i32 - 1 - position.y;

    let away = [
        (west, Direction::East),
        (east, Direction::West),
        (south, Direction::North),
        (north, Direction::South),
    ]
    .into_iter()
    .min_by_key(|&(distance, _)| distance)
    .map_or(Direction::Idle, |(_, direction)| direction);

    let open = |direction: Direction| {
        let next = position.offset(direction);
        dims.contains(next) && !belief.is_blocked(next)
    };

    if open(away) {
        return away;
    }
    Direction::CARDINAL
        .into_iter()
        .find(|&direction| open(direction))
        .unwrap_or(Direction::Idle)
}

#[cfg(test)]
mod tests {
    use tileworld_core::{CellContent, ObjectId};

    use super::*;
    use crate::coverage::RegionPool;
    use crate::test_helpers::FakeWorld;

    fn agent(dims: GridDimensions, fuel: Arc<FuelRecord>) -> TileworldAgent {
        let pool = Arc::new(RegionPool::new(dims, 1, 2).unwrap());
        let claim = pool.claim().unwrap();
        TileworldAgent::new("test", claim, fuel, AgentConfig::default(), dims)
    }

    #[test]
    fn standing_on_collectible_collects_without_moving() {
        let mut world = FakeWorld::open(10, 10).at(4, 4).carrying(2);
        world.put(4, 4, CellContent::Collectible(ObjectId(1)));
        let mut agent = agent(world.dims, Arc::new(FuelRecord::new()));

        let outcome = agent.tick(&mut world);
        assert_eq!(outcome.action, Action::Collect);
        assert!(outcome.succeeded());
        assert_eq!(world.carried, 3);
        assert_eq!(world.position, Coordinate::new(4, 4));
    }

    #[test]
    fn sensed_fuel_is_published() {
        let mut world = FakeWorld::open(10, 10).at(4, 4);
        world.put(6, 5, CellContent::FuelResource);
        let fuel = Arc::new(FuelRecord::new());
        let mut agent = agent(world.dims, Arc::clone(&fuel));

        agent.think(&world, &world);
        assert_eq!(fuel.location(), Some(Coordinate::new(6, 5)));
    }

    #[test]
    fn steps_toward_goal() {
        let mut world = FakeWorld::open(10, 10).at(0, 0);
        world.put(2, 0, CellContent::Collectible(ObjectId(3)));
        let mut agent = agent(world.dims, Arc::new(FuelRecord::known(Coordinate::new(0, 1))));

        assert_eq!(agent.think(&world, &world), Action::Move(Direction::East));
        agent.tick(&mut world);
        agent.tick(&mut world);
        assert_eq!(world.position, Coordinate::new(2, 0));
        assert_eq!(agent.tick(&mut world).action, Action::Collect);
    }

    #[test]
    fn rejected_move_is_swallowed_and_replanned() {
        let mut world = FakeWorld::open(10, 10).at(0, 0);
        world.put(3, 0, CellContent::Collectible(ObjectId(3)));
        world.hidden.insert(Coordinate::new(1, 0));
        let mut agent = agent(world.dims, Arc::new(FuelRecord::known(Coordinate::new(0, 1))));

        let outcome = agent.tick(&mut world);
        assert_eq!(outcome.action, Action::Move(Direction::East));
        assert_eq!(
            outcome.rejection,
            Some(ActionError::Blocked {
                destination: Coordinate::new(1, 0)
            })
        );
        assert_eq!(world.position, Coordinate::new(0, 0));

        // The obstacle is now sensed; planning routes around it.
        world.hidden.clear();
        world.block([(1, 0)]);
        let outcome = agent.tick(&mut world);
        assert_eq!(outcome.action, Action::Move(Direction::North));
        assert!(outcome.succeeded());
    }

    #[test]
    fn unreachable_goal_falls_back_away_from_edge() {
        let mut world = FakeWorld::open(10, 10).at(0, 5);
        world.put(2, 5, CellContent::Collectible(ObjectId(3)));
        world.block([(1, 5), (3, 5), (2, 4), (2, 6)]);
        let mut agent = agent(world.dims, Arc::new(FuelRecord::known(Coordinate::new(0, 4))));

        assert_eq!(agent.think(&world, &world), Action::Move(Direction::North));
    }

    #[test]
    fn unreachable_waypoint_is_skipped() {
        // First waypoint of a radius-2 sweep is (2, 2); wall it in.
        let mut world = FakeWorld::open(10, 10).at(5, 5);
        world.block([(1, 2), (3, 2), (2, 1), (2, 3)]);
        let mut agent = agent(world.dims, Arc::new(FuelRecord::new()));
        let second = agent.claim().region().waypoints()[1];
        assert_eq!(agent.claim().region().current(), Coordinate::new(2, 2));

        agent.tick(&mut world);
        assert_eq!(agent.claim().region().current(), second);

        // The next waypoint is open, so the agent plans instead of falling back.
        let before = world.position;
        let outcome = agent.tick(&mut world);
        assert!(outcome.succeeded());
        assert_eq!(world.position.manhattan(second), before.manhattan(second) - 1);
        assert_eq!(agent.claim().region().current(), second);
    }

    #[test]
    fn unreachable_task_goal_keeps_patrol_cursor() {
        let mut world = FakeWorld::open(10, 10).at(0, 5);
        world.put(2, 5, CellContent::Collectible(ObjectId(3)));
        world.block([(1, 5), (3, 5), (2, 4), (2, 6)]);
        let mut agent = agent(world.dims, Arc::new(FuelRecord::known(Coordinate::new(0, 4))));
        let first = agent.claim().region().current();

        agent.think(&world, &world);
        assert_eq!(agent.claim().region().current(), first);
    }

    #[test]
    fn goal_underfoot_idles() {
        // Emergency sends the agent to fuel it already stands on, but the
        // tank is above the refuel tolerance, so the plan is empty.
        let mut world = FakeWorld::open(10, 10).at(4, 4).with_fuel(10);
        world.put(4, 4, CellContent::FuelResource);
        let config = AgentConfig::default()
            .with_refuel_tolerance(5)
            .with_fuel_threshold(20);
        let dims = world.dims;
        let pool = Arc::new(RegionPool::new(dims, 1, 2).unwrap());
        let mut agent = TileworldAgent::new(
            "test",
            pool.claim().unwrap(),
            Arc::new(FuelRecord::new()),
            config,
            dims,
        );

        let outcome = agent.tick(&mut world);
        assert_eq!(outcome.action, Action::IDLE);
        assert!(outcome.succeeded());
        assert_eq!(world.position, Coordinate::new(4, 4));
    }

    #[test]
    fn fallback_prefers_leaving_nearest_edge() {
        let world = FakeWorld::open(10, 10);
        let dims = world.dims;
        assert_eq!(
            boundary_fallback(Coordinate::new(1, 5), &world, dims),
            Direction::East
        );
        assert_eq!(
            boundary_fallback(Coordinate::new(8, 5), &world, dims),
            Direction::West
        );
        assert_eq!(
            boundary_fallback(Coordinate::new(5, 0), &world, dims),
            Direction::North
        );
        assert_eq!(
            boundary_fallback(Coordinate::new(5, 9), &world, dims),
            Direction::South
        );
        // Corner: west and south tie, west wins.
        assert_eq!(
            boundary_fallback(Coordinate::new(0, 0), &world, dims),
            Direction::East
        );
    }

    #[test]
    fn fallback_uses_open_neighbour_or_idles() {
        let mut world = FakeWorld::open(10, 10);
        world.block([(2, 5)]);
        assert_eq!(
            boundary_fallback(Coordinate::new(1, 5), &world, world.dims),
            Direction::North
        );

        world.block([(1, 6), (1, 4), (0, 5)]);
        assert_eq!(
            boundary_fallback(Coordinate::new(1, 5), &world, world.dims),
            Direction::Idle
        );
    }

    #[test]
    fn dropping_agent_releases_region() {
        let dims = GridDimensions::new(10, 10);
        let pool = Arc::new(RegionPool::new(dims, 1, 2).unwrap());
        let agent = TileworldAgent::new(
            "a",
            pool.claim().unwrap(),
            Arc::new(FuelRecord::new()),
            AgentConfig::default(),
            dims,
        );
        assert_eq!(pool.available(), 0);
        drop(agent);
        assert_eq!(pool.available(), 1);
    }
}
