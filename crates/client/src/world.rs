//! In-memory tileworld.
//!
//! [`GridWorld`] owns the ground truth: permanent and transient obstacles,
//! collectibles, disposal sites, the single fuel resource and every agent's
//! body. Agents never see it directly; [`GridWorld::view`] hands out an
//! [`AgentView`] that implements the collaborator traits for one agent.
use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tileworld_core::{
    ActionError, AgentConfig, AgentState, BeliefGrid, CellContent, CellKind, Coordinate,
    Direction, GridDimensions, ObjectId, WorldActions,
};

use crate::config::SimConfig;
use crate::error::WorldError;

/// World generation and dynamics parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldParams {
    pub dims: GridDimensions,
    pub agent: AgentConfig,
    pub obstacle_density: f64,
    pub spawn_rate: f64,
    pub lifetime: u64,
    pub seed: u64,
}

impl WorldParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            dims: config.dimensions(),
            agent: config.agent.clone(),
            obstacle_density: config.obstacle_density,
            spawn_rate: config.spawn_rate,
            lifetime: config.lifetime,
            seed: config.seed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    obstacle: bool,
    content: CellContent,
    /// Tick at which a transient item disappears.
    expires_at: Option<u64>,
}

impl Cell {
    fn is_free(&self) -> bool {
        !self.obstacle && self.content.is_empty()
    }

    fn clear(&mut self) {
        *self = Cell::default();
    }
}

/// What an agent remembers from its last sensor sweep.
#[derive(Clone, Debug, Default)]
struct Memory {
    blocked: HashSet<Coordinate>,
    contents: HashMap<Coordinate, CellContent>,
}

/// Physical state of one agent.
#[derive(Clone, Debug)]
pub struct AgentBody {
    pub position: Coordinate,
    pub fuel: u32,
    pub carried: u32,
    pub deposits: u32,
    memory: Memory,
}

/// Item kinds that appear and disappear during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Spawn {
    Obstacle,
    Collectible,
    DisposalSite,
}

#[derive(Clone, Debug)]
pub struct GridWorld {
    params: WorldParams,
    cells: Vec<Cell>,
    fuel_station: Coordinate,
    agents: Vec<AgentBody>,
    rng: ChaCha8Rng,
    tick: u64,
    next_object: u32,
}

impl GridWorld {
    /// Generates a random world for `agents` agents.
    ///
    /// Permanent obstacles are scattered with `obstacle_density`, then the
    /// fuel resource and the agents are placed on distinct free cells.
    pub fn generate(params: WorldParams, agents: usize) -> Result<Self, WorldError> {
        let mut world = Self::empty(params);

        let density = world.params.obstacle_density;
        for cell in &mut world.cells {
            if world.rng.random_bool(density) {
                cell.obstacle = true;
            }
        }

        let mut free: Vec<usize> = (0..world.cells.len())
            .filter(|&index| world.cells[index].is_free())
            .collect();

        let station = world.take_random(&mut free, "fuel resource")?;
        world.set_fuel_station(station);

        for _ in 0..agents {
            let at = world.take_random(&mut free, "agent")?;
            world.spawn_agent(at);
        }

        tracing::info!(
            "generated {}x{} world: fuel at {}, {} agents, {} obstacles",
            world.params.dims.width,
            world.params.dims.height,
            station,
            agents,
            world.cells.iter().filter(|cell| cell.obstacle).count()
        );
        Ok(world)
    }

    /// Builds an obstacle-free world with a fixed layout.
    pub fn with_layout(
        params: WorldParams,
        fuel_station: Coordinate,
        agents: &[Coordinate],
    ) -> Result<Self, WorldError> {
        let mut world = Self::empty(params);
        if !world.params.dims.contains(fuel_station) {
            return Err(WorldError::Unplaceable { at: fuel_station });
        }
        world.set_fuel_station(fuel_station);

        for &at in agents {
            if !world.is_free(at) || world.agent_at(at).is_some() {
                return Err(WorldError::Unplaceable { at });
            }
            world.spawn_agent(at);
        }
        Ok(world)
    }

    fn empty(params: WorldParams) -> Self {
        let cells = vec![Cell::default(); params.dims.cell_count()];
        let rng = ChaCha8Rng::seed_from_u64(params.seed);
        Self {
            params,
            cells,
            fuel_station: Coordinate::ORIGIN,
            agents: Vec::new(),
            rng,
            tick: 0,
            next_object: 0,
        }
    }

    fn take_random(&mut self, free: &mut Vec<usize>, what: &'static str) -> Result<Coordinate, WorldError> {
        if free.is_empty() {
            return Err(WorldError::NoFreeCell { what });
        }
        let index = free.swap_remove(self.rng.random_range(0..free.len()));
        Ok(self.params.dims.coordinate(index))
    }

    fn set_fuel_station(&mut self, at: Coordinate) {
        if let Some(cell) = self.cell_mut(at) {
            cell.clear();
            cell.content = CellContent::FuelResource;
        }
        self.fuel_station = at;
    }

    fn spawn_agent(&mut self, at: Coordinate) {
        self.agents.push(AgentBody {
            position: at,
            fuel: self.params.agent.default_fuel,
            carried: 0,
            deposits: 0,
            memory: Memory::default(),
        });
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.params.dims
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn fuel_station(&self) -> Coordinate {
        self.fuel_station
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn body(&self, agent: usize) -> Option<&AgentBody> {
        self.agents.get(agent)
    }

    /// Total deposits across all agents.
    pub fn score(&self) -> u32 {
        self.agents.iter().map(|body| body.deposits).sum()
    }

    pub fn content_at(&self, at: Coordinate) -> CellContent {
        self.cell(at).map(|cell| cell.content).unwrap_or_default()
    }

    pub fn is_obstacle(&self, at: Coordinate) -> bool {
        self.cell(at).is_some_and(|cell| cell.obstacle)
    }

    /// Places a transient item on a free cell. Returns `false` if the cell
    /// is occupied, out of bounds or holds an agent.
    pub fn place(&mut self, at: Coordinate, content: CellContent) -> bool {
        self.place_transient(at, false, content)
    }

    /// Places a transient obstacle on a free cell.
    pub fn place_obstacle(&mut self, at: Coordinate) -> bool {
        self.place_transient(at, true, CellContent::Empty)
    }

    fn place_transient(&mut self, at: Coordinate, obstacle: bool, content: CellContent) -> bool {
        if !self.is_free(at) || self.agent_at(at).is_some() {
            return false;
        }
        let expires_at = Some(self.tick + self.params.lifetime);
        match self.cell_mut(at) {
            Some(cell) => {
                *cell = Cell {
                    obstacle,
                    content,
                    expires_at,
                };
                true
            }
            None => false,
        }
    }

    /// Advances world time: expires old items, then spawns new ones.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
        let now = self.tick;

        let mut expired = 0usize;
        for cell in &mut self.cells {
            if cell.expires_at.is_some_and(|at| at <= now) {
                cell.clear();
                expired += 1;
            }
        }

        let mut spawned = 0usize;
        for kind in [Spawn::Obstacle, Spawn::Collectible, Spawn::DisposalSite] {
            if self.rng.random_bool(self.params.spawn_rate) && self.spawn_random(kind) {
                spawned += 1;
            }
        }

        tracing::trace!("tick {}: {} expired, {} spawned", now, expired, spawned);
    }

    fn spawn_random(&mut self, kind: Spawn) -> bool {
        let index = self.rng.random_range(0..self.cells.len());
        let at = self.params.dims.coordinate(index);
        match kind {
            Spawn::Obstacle => self.place_obstacle(at),
            Spawn::Collectible => {
                let id = ObjectId(self.next_object);
                let placed = self.place(at, CellContent::Collectible(id));
                if placed {
                    self.next_object += 1;
                }
                placed
            }
            Spawn::DisposalSite => self.place(at, CellContent::DisposalSite),
        }
    }

    /// Refreshes agent `agent`'s sensor memory and returns its view of the
    /// world, or `None` for an unknown agent.
    pub fn view(&mut self, agent: usize) -> Option<AgentView<'_>> {
        if agent >= self.agents.len() {
            return None;
        }
        self.sense(agent);
        Some(AgentView { world: self, agent })
    }

    fn sense(&mut self, agent: usize) {
        let Some(body) = self.agents.get(agent) else {
            return;
        };
        let origin = body.position;
        let radius = self.params.agent.sensor_radius as i32;

        let mut seen_blocked = Vec::new();
        let mut seen_clear = Vec::new();
        let mut seen_contents = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let at = Coordinate::new(origin.x + dx, origin.y + dy);
                let Some(cell) = self.cell(at) else {
                    continue;
                };
                let occupied = self
                    .agent_at(at)
                    .is_some_and(|other| other != agent);
                if cell.obstacle || occupied {
                    seen_blocked.push(at);
                } else {
                    seen_clear.push(at);
                }
                seen_contents.push((at, cell.content));
            }
        }

        let memory = &mut self.agents[agent].memory;
        for at in seen_clear {
            memory.blocked.remove(&at);
        }
        memory.blocked.extend(seen_blocked);
        for (at, content) in seen_contents {
            if content.is_empty() {
                memory.contents.remove(&at);
            } else {
                memory.contents.insert(at, content);
            }
        }
    }

    fn cell(&self, at: Coordinate) -> Option<&Cell> {
        self.params.dims.index(at).and_then(|index| self.cells.get(index))
    }

    fn cell_mut(&mut self, at: Coordinate) -> Option<&mut Cell> {
        self.params
            .dims
            .index(at)
            .and_then(|index| self.cells.get_mut(index))
    }

    fn is_free(&self, at: Coordinate) -> bool {
        self.cell(at).is_some_and(Cell::is_free)
    }

    fn agent_at(&self, at: Coordinate) -> Option<usize> {
        self.agents.iter().position(|body| body.position == at)
    }
}

/// One agent's window onto a [`GridWorld`].
///
/// The belief side answers from the agent's sensor memory, which is refreshed
/// when the view is created. The action side mutates the real world.
pub struct AgentView<'a> {
    world: &'a mut GridWorld,
    agent: usize,
}

impl AgentView<'_> {
    pub fn agent(&self) -> usize {
        self.agent
    }

    fn body(&self) -> &AgentBody {
        &self.world.agents[self.agent]
    }

    fn body_mut(&mut self) -> &mut AgentBody {
        &mut self.world.agents[self.agent]
    }

    fn in_sensor_range(&self, at: Coordinate) -> bool {
        self.body().position.chebyshev(at) <= self.world.params.agent.sensor_radius
    }
}

impl BeliefGrid for AgentView<'_> {
    fn dimensions(&self) -> GridDimensions {
        self.world.params.dims
    }

    fn is_blocked(&self, coordinate: Coordinate) -> bool {
        !self.world.params.dims.contains(coordinate)
            || self.body().memory.blocked.contains(&coordinate)
    }

    fn content_at(&self, coordinate: Coordinate) -> CellContent {
        self.body()
            .memory
            .contents
            .get(&coordinate)
            .copied()
            .unwrap_or_default()
    }

    fn nearest_of(&self, kind: CellKind, from: Coordinate) -> Option<Coordinate> {
        self.body()
            .memory
            .contents
            .iter()
            .filter(|&(&at, content)| content.kind() == Some(kind) && self.in_sensor_range(at))
            .map(|(&at, _)| at)
            .min_by_key(|at| (at.manhattan(from), at.x, at.y))
    }
}

impl AgentState for AgentView<'_> {
    fn position(&self) -> Coordinate {
        self.body().position
    }

    fn fuel_level(&self) -> u32 {
        self.body().fuel
    }

    fn carried(&self) -> u32 {
        self.body().carried
    }
}

impl WorldActions for AgentView<'_> {
    fn move_agent(&mut self, direction: Direction) -> Result<(), ActionError> {
        if direction.is_idle() {
            return Ok(());
        }
        if self.body().fuel == 0 {
            return Err(ActionError::OutOfFuel);
        }

        let destination = self.body().position.offset(direction);
        if !self.world.params.dims.contains(destination) {
            return Err(ActionError::OutOfBounds { destination });
        }
        if self.world.is_obstacle(destination) || self.world.agent_at(destination).is_some() {
            return Err(ActionError::Blocked { destination });
        }

        let body = self.body_mut();
        body.position = destination;
        body.fuel -= 1;
        Ok(())
    }

    fn collect(&mut self) -> Result<(), ActionError> {
        let position = self.body().position;
        let limit = self.world.params.agent.max_carried;
        if !matches!(self.world.content_at(position), CellContent::Collectible(_)) {
            return Err(ActionError::NothingToCollect { position });
        }
        if self.body().carried >= limit {
            return Err(ActionError::CarryLimit { limit });
        }

        if let Some(cell) = self.world.cell_mut(position) {
            cell.clear();
        }
        self.body_mut().carried += 1;
        Ok(())
    }

    fn deposit(&mut self) -> Result<(), ActionError> {
        let position = self.body().position;
        if self.body().carried == 0 {
            return Err(ActionError::NothingToDeposit);
        }
        if self.world.content_at(position) != CellContent::DisposalSite {
            return Err(ActionError::NoDisposalSite { position });
        }

        // A filled site is used up.
        if let Some(cell) = self.world.cell_mut(position) {
            cell.clear();
        }
        let body = self.body_mut();
        body.carried -= 1;
        body.deposits += 1;
        Ok(())
    }

    fn refuel(&mut self) -> Result<(), ActionError> {
        let position = self.body().position;
        if position != self.world.fuel_station {
            return Err(ActionError::NoFuelResource { position });
        }
        let tank = self.world.params.agent.default_fuel;
        self.body_mut().fuel = tank;
        Ok(())
    }
}
