//! Grid geometry: coordinates, directions, and the obstacle map.

use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ChaseError;

/// A cell on the grid. `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One orthogonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// The neighbouring cell in this direction, or `None` past the top/left edge.
    pub fn neighbour(&self, from: Coord) -> Option<Coord> {
        match self {
            Direction::Right => Some(Coord::new(from.x.checked_add(1)?, from.y)),
            Direction::Left => Some(Coord::new(from.x.checked_sub(1)?, from.y)),
            Direction::Down => Some(Coord::new(from.x, from.y.checked_add(1)?)),
            Direction::Up => Some(Coord::new(from.x, from.y.checked_sub(1)?)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => write!(f, "right"),
            Direction::Left => write!(f, "left"),
            Direction::Down => write!(f, "down"),
            Direction::Up => write!(f, "up"),
        }
    }
}

/// A square grid with a fixed set of blocked cells.
///
/// Deserialization goes through [`Grid::new`], so a decoded grid is never
/// empty and never holds out-of-bounds obstacles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridLayout"))]
pub struct Grid {
    size: u32,
    obstacles: BTreeSet<Coord>,
}

/// Unchecked wire form of [`Grid`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GridLayout {
    size: u32,
    obstacles: Vec<Coord>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridLayout> for Grid {
    type Error = ChaseError;

    fn try_from(layout: GridLayout) -> Result<Self, Self::Error> {
        Grid::new(layout.size, layout.obstacles)
    }
}

impl Grid {
    /// Builds a grid of `size × size` cells.
    ///
    /// Fails if the grid is empty or an obstacle lies outside it.
    pub fn new(size: u32, obstacles: impl IntoIterator<Item = Coord>) -> Result<Self, ChaseError> {
        if size == 0 {
            return Err(ChaseError::EmptyGrid);
        }
        let obstacles: BTreeSet<Coord> = obstacles.into_iter().collect();
        if let Some(c) = obstacles.iter().find(|c| c.x >= size || c.y >= size) {
            return Err(ChaseError::ObstacleOutOfBounds {
                x: c.x,
                y: c.y,
                size,
            });
        }
        Ok(Self { size, obstacles })
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Largest valid coordinate on either axis.
    pub fn max_index(&self) -> u32 {
        self.size - 1
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x <= self.max_index() && c.y <= self.max_index()
    }

    pub fn is_obstacle(&self, c: Coord) -> bool {
        self.obstacles.contains(&c)
    }

    /// Inside the grid and not blocked.
    pub fn is_open(&self, c: Coord) -> bool {
        self.contains(c) && !self.is_obstacle(c)
    }

    /// Whether a step from `from` in `dir` lands on an open cell.
    pub fn can_step(&self, from: Coord, dir: Direction) -> bool {
        dir.neighbour(from).is_some_and(|to| self.is_open(to))
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Coord> {
        self.obstacles.iter()
    }

    /// Rejects a coordinate that is outside the grid or blocked.
    pub fn check_placement(&self, subject: &str, c: Coord) -> Result<(), ChaseError> {
        if !self.contains(c) {
            return Err(ChaseError::OutOfBounds {
                subject: subject.to_string(),
                x: c.x,
                y: c.y,
                size: self.size,
            });
        }
        if self.is_obstacle(c) {
            return Err(ChaseError::InsideObstacle {
                subject: subject.to_string(),
                x: c.x,
                y: c.y,
            });
        }
        Ok(())
    }
}
