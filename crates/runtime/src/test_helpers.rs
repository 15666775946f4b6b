//! In-memory world used by unit tests.
use std::collections::{HashMap, HashSet};

use tileworld_core::{
    ActionError, AgentState, BeliefGrid, CellContent, CellKind, Coordinate, Direction,
    GridDimensions, WorldActions,
};

/// A single-agent world whose belief is the ground truth, except for cells in
/// `hidden`, which reject moves without the agent knowing about them.
#[derive(Clone, Debug)]
pub(crate) struct FakeWorld {
    pub dims: GridDimensions,
    pub position: Coordinate,
    pub fuel: u32,
    pub carried: u32,
    pub sensor_radius: u32,
    pub blocked: HashSet<Coordinate>,
    pub hidden: HashSet<Coordinate>,
    pub contents: HashMap<Coordinate, CellContent>,
}

impl FakeWorld {
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dims: GridDimensions::new(width, height),
            position: Coordinate::new(0, 0),
            fuel: 500,
            carried: 0,
            sensor_radius: 3,
            blocked: HashSet::new(),
            hidden: HashSet::new(),
            contents: HashMap::new(),
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Coordinate::new(x, y);
        self
    }

    pub fn carrying(mut self, carried: u32) -> Self {
        self.carried = carried;
        self
    }

    pub fn with_fuel(mut self, fuel: u32) -> Self {
        self.fuel = fuel;
        self
    }

    pub fn block(&mut self, cells: impl IntoIterator<Item = (i32, i32)>) {
        self.blocked
            .extend(cells.into_iter().map(|(x, y)| Coordinate::new(x, y)));
    }

    pub fn put(&mut self, x: i32, y: i32, content: CellContent) {
        self.contents.insert(Coordinate::new(x, y), content);
    }
}

impl BeliefGrid for FakeWorld {
    fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    fn is_blocked(&self, coordinate: Coordinate) -> bool {
        !self.dims.contains(coordinate) || self.blocked.contains(&coordinate)
    }

    fn content_at(&self, coordinate: Coordinate) -> CellContent {
        self.contents.get(&coordinate).copied().unwrap_or_default()
    }

    fn nearest_of(&self, kind: CellKind, from: Coordinate) -> Option<Coordinate> {
        self.contents
            .iter()
            .filter(|(at, content)| {
                content.kind() == Some(kind)
                    && at.chebyshev(self.position) <= self.sensor_radius
            })
            .map(|(at, _)| *at)
            .min_by_key(|at| (at.manhattan(from), at.x, at.y))
    }
}

impl AgentState for FakeWorld {
    fn position(&self) -> Coordinate {
        self.position
    }

    fn fuel_level(&self) -> u32 {
        self.fuel
    }

    fn carried(&self) -> u32 {
        self.carried
    }
}

impl WorldActions for FakeWorld {
    fn move_agent(&mut self, direction: Direction) -> Result<(), ActionError> {
        if direction.is_idle() {
            return Ok(());
        }
        if self.fuel == 0 {
            return Err(ActionError::OutOfFuel);
        }
        let destination = self.position.offset(direction);
        if !self.dims.contains(destination) {
            return Err(ActionError::OutOfBounds { destination });
        }
        if self.blocked.contains(&destination) || self.hidden.contains(&destination) {
            return Err(ActionError::Blocked { destination });
        }
        self.position = destination;
        self.fuel -= 1;
        Ok(())
    }

    fn collect(&mut self) -> Result<(), ActionError> {
        match self.content_at(self.position) {
            CellContent::Collectible(_) => {
                self.contents.remove(&self.position);
                self.carried += 1;
                Ok(())
            }
            _ => Err(ActionError::NothingToCollect {
                position: self.position,
            }),
        }
    }

    fn deposit(&mut self) -> Result<(), ActionError> {
        if self.carried == 0 {
            return Err(ActionError::NothingToDeposit);
        }
        match self.content_at(self.position) {
            CellContent::DisposalSite => {
                self.carried -= 1;
                Ok(())
            }
            _ => Err(ActionError::NoDisposalSite {
                position: self.position,
            }),
        }
    }

    fn refuel(&mut self) -> Result<(), ActionError> {
        match self.content_at(self.position) {
            CellContent::FuelResource => {
                self.fuel = 500;
                Ok(())
            }
            _ => Err(ActionError::NoFuelResource {
                position: self.position,
            }),
        }
    }
}
