#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tileworld_core::{
    ActionError, AgentConfig, AgentState, BeliefGrid, CellContent, CellKind, Coordinate,
    Direction, GridDimensions, ObjectId, WorldActions,
};
use tileworld_runtime::{FuelRecord, RegionPool, TileworldAgent};

/// Single-agent world parsed from an ASCII map.
///
/// The first line is the top row (highest `y`). Legend:
/// `.` empty, `#` obstacle, `F` fuel resource, `D` disposal site,
/// `o` collectible, `A` agent start.
///
/// The agent only believes in obstacles inside its sensor square.
pub struct MapWorld {
    pub dims: GridDimensions,
    pub position: Coordinate,
    pub fuel: u32,
    pub carried: u32,
    pub sensor_radius: u32,
    pub obstacles: HashSet<Coordinate>,
    pub contents: HashMap<Coordinate, CellContent>,
    pub deposits: u32,
}

impl MapWorld {
    pub fn parse(map: &str) -> Self {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;

        let mut world = Self {
            dims: GridDimensions::new(width, height),
            position: Coordinate::ORIGIN,
            fuel: AgentConfig::DEFAULT_FUEL,
            carried: 0,
            sensor_radius: AgentConfig::DEFAULT_SENSOR_RADIUS,
            obstacles: HashSet::new(),
            contents: HashMap::new(),
            deposits: 0,
        };

        let mut next_id = 0;
        for (row, line) in rows.iter().enumerate() {
            let y = (height as usize - 1 - row) as i32;
            for (x, cell) in line.chars().enumerate() {
                let at = Coordinate::new(x as i32, y);
                match cell {
                    '#' => {
                        world.obstacles.insert(at);
                    }
                    'F' => {
                        world.contents.insert(at, CellContent::FuelResource);
                    }
                    'D' => {
                        world.contents.insert(at, CellContent::DisposalSite);
                    }
                    'o' => {
                        next_id += 1;
                        world
                            .contents
                            .insert(at, CellContent::Collectible(ObjectId(next_id)));
                    }
                    'A' => world.position = at,
                    _ => {}
                }
            }
        }
        world
    }

    pub fn with_fuel(mut self, fuel: u32) -> Self {
        self.fuel = fuel;
        self
    }

    pub fn carrying(mut self, carried: u32) -> Self {
        self.carried = carried;
        self
    }

    fn sensed(&self, at: Coordinate) -> bool {
        at.chebyshev(self.position) <= self.sensor_radius
    }
}

impl BeliefGrid for MapWorld {
    fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    fn is_blocked(&self, coordinate: Coordinate) -> bool {
        !self.dims.contains(coordinate)
            || (self.sensed(coordinate) && self.obstacles.contains(&coordinate))
    }

    fn content_at(&self, coordinate: Coordinate) -> CellContent {
        self.contents.get(&coordinate).copied().unwrap_or_default()
    }

    fn nearest_of(&self, kind: CellKind, from: Coordinate) -> Option<Coordinate> {
        self.contents
            .iter()
            .filter(|(at, content)| content.kind() == Some(kind) && self.sensed(**at))
            .map(|(at, _)| *at)
            .min_by_key(|at| (at.manhattan(from), at.x, at.y))
    }
}

impl AgentState for MapWorld {
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

impl WorldActions for MapWorld {
    fn move_agent(&mut self, direction: Direction) -> Result<(), ActionError> {
        if self.fuel == 0 {
            return Err(ActionError::OutOfFuel);
        }
        let destination = self.position.offset(direction);
        if !self.dims.contains(destination) {
            return Err(ActionError::OutOfBounds { destination });
        }
        if self.obstacles.contains(&destination) {
            return Err(ActionError::Blocked { destination });
        }
        self.position = destination;
        self.fuel -= 1;
        Ok(())
    }

    fn collect(&mut self) -> Result<(), ActionError> {
        let position = self.position;
        match self.content_at(position) {
            CellContent::Collectible(_) => {
                self.contents.remove(&position);
                self.carried += 1;
                Ok(())
            }
            _ => Err(ActionError::NothingToCollect { position }),
        }
    }

    fn deposit(&mut self) -> Result<(), ActionError> {
        let position = self.position;
        if self.carried == 0 {
            return Err(ActionError::NothingToDeposit);
        }
        match self.content_at(position) {
            CellContent::DisposalSite => {
                self.carried -= 1;
                self.deposits += 1;
                Ok(())
            }
            _ => Err(ActionError::NoDisposalSite { position }),
        }
    }

    fn refuel(&mut self) -> Result<(), ActionError> {
        let position = self.position;
        match self.content_at(position) {
            CellContent::FuelResource => {
                self.fuel = AgentConfig::DEFAULT_FUEL;
                Ok(())
            }
            _ => Err(ActionError::NoFuelResource { position }),
        }
    }
}

/// An agent owning the whole width of `dims`.
pub fn solo_agent(dims: GridDimensions, fuel: Arc<FuelRecord>, config: AgentConfig) -> TileworldAgent {
    let pool = Arc::new(RegionPool::new(dims, 1, config.sensor_radius).unwrap());
    let claim = pool.claim().unwrap();
    TileworldAgent::new("agent-0", claim, fuel, config, dims)
}
