//! Grid geometry and cell contents.
//!
//! Everything the decision core knows about space is expressed with the types
//! in this module: [`Coordinate`] for a cell, [`GridDimensions`] for the bounded
//! world, [`Direction`] for single-step moves and [`CellContent`] for what a
//! cell holds.
use std::fmt;

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring coordinate one step in `direction`.
    ///
    /// The result may lie outside the grid; callers check with
    /// [`GridDimensions::contains`].
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chessboard distance, the shape of a square sensor footprint.
    pub fn chebyshev(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of the bounded world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && coordinate.x < self.width as i32
            && coordinate.y < self.height as i32
    }

    /// Row-major index of `coordinate`, or `None` when it is out of bounds.
    pub fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.contains(coordinate) {
            return None;
        }
        Some(coordinate.y as usize * self.width as usize + coordinate.x as usize)
    }

    /// Inverse of [`GridDimensions::index`].
    pub fn coordinate(&self, index: usize) -> Coordinate {
        let width = self.width as usize;
        Coordinate::new((index % width) as i32, (index / width) as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Depth cap for path search on this grid.
    ///
    /// Any simple detour-free route is shorter than `width + height`; beyond
    /// that the agent's stale obstacle knowledge makes further search useless.
    pub fn search_depth(&self) -> u32 {
        self.width + self.height
    }

    /// Row that splits the grid into its lower and upper halves.
    pub fn vertical_center(&self) -> i32 {
        (self.height / 2) as i32
    }
}

/// A single-step movement, or staying in place.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Idle,
}

impl Direction {
    /// The four moving directions in the fixed tie-break order used by search.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Idle => (0, 0),
        }
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Direction::Idle)
    }
}

/// Identifier of a collectible object, assigned by the host world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What occupies a grid cell, as far as the agent can interact with it.
///
/// Obstacles are not contents: they are reported through
/// [`crate::BeliefGrid::is_blocked`] because an agent can never stand on one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellContent {
    #[default]
    Empty,
    FuelResource,
    DisposalSite,
    Collectible(ObjectId),
}

impl CellContent {
    pub fn kind(self) -> Option<CellKind> {
        match self {
            CellContent::Empty => None,
            CellContent::FuelResource => Some(CellKind::FuelResource),
            CellContent::DisposalSite => Some(CellKind::DisposalSite),
            CellContent::Collectible(_) => Some(CellKind::Collectible),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

/// Query key for nearest-object lookups on the belief grid.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CellKind {
    FuelResource,
    DisposalSite,
    Collectible,
}
