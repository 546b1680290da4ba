//! Grid coordinates and headings
//!
//! The play field is a fixed `GRID x GRID` square. `y` grows downward to match
//! screen space, so `Heading::Up` decrements `y`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRID;

/// A grid cell. May lie outside the field after an offset; use
/// [`Cell::in_bounds`] before treating it as part of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies inside `[0, GRID)` on both axes
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..GRID).contains(&self.x) && (0..GRID).contains(&self.y)
    }

    /// Neighbouring cell one step along `heading` (unchecked)
    #[inline]
    pub fn step(self, heading: Heading) -> Self {
        Self::from(IVec2::from(self) + heading.delta())
    }

    /// Row-major index into a `GRID * GRID` table. Only valid in bounds.
    #[inline]
    pub fn index(self) -> usize {
        (self.y * GRID + self.x) as usize
    }

    /// Inverse of [`Cell::index`]
    #[inline]
    pub fn from_index(index: usize) -> Self {
        let i = index as i32;
        Self::new(i % GRID, i / GRID)
    }

    /// Manhattan distance
    pub fn distance(self, other: Cell) -> i32 {
        (IVec2::from(self) - IVec2::from(other)).abs().element_sum()
    }
}

impl From<Cell> for IVec2 {
    fn from(cell: Cell) -> Self {
        IVec2::new(cell.x, cell.y)
    }
}

impl From<IVec2> for Cell {
    fn from(v: IVec2) -> Self {
        Cell::new(v.x, v.y)
    }
}

/// Total number of cells on the board
pub const CELL_COUNT: usize = (GRID * GRID) as usize;

/// Axis-aligned movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// The 180° reversal of this heading
    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Heading) -> bool {
        self.opposite() == other
    }

    /// Unit vector in grid space
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::NEG_Y,
            Heading::Down => IVec2::Y,
            Heading::Left => IVec2::NEG_X,
            Heading::Right => IVec2::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Heading::Up),
            "down" => Some(Heading::Down),
            "left" => Some(Heading::Left),
            "right" => Some(Heading::Right),
            _ => None,
        }
    }
}
