//! Square grid coordinates for the tunnel board.
//!
//! This module provides the foundational coordinate types for the board:
//! - `Coord`: Identifies a cell by row and column
//! - `Side`: One of the four edges of a cell
//!
//! Cells are addressed by index into a fixed-size grid rather than linked to
//! each other, so connectivity walks are plain index arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows on the board
pub const ROWS: usize = 7;

/// Number of columns on the board
pub const COLS: usize = 11;

/// One of the four sides of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// All sides in clockwise order starting from North
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    /// The side facing this one across a shared edge
    pub const fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::West => Side::East,
        }
    }

    /// Index into a `[T; 4]` laid out in `Side::ALL` order
    pub const fn index(self) -> usize {
        match self {
            Side::North => 0,
            Side::East => 1,
            Side::South => 2,
            Side::West => 3,
        }
    }
}

/// Position of a cell on the board.
///
/// `row` increases going south, `col` increases going east.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate lies on the board
    pub const fn in_bounds(&self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Row-major index into the cell arena
    pub const fn index(&self) -> usize {
        self.row * COLS + self.col
    }

    /// Inverse of [`Coord::index`]
    pub const fn from_index(index: usize) -> Self {
        Self::new(index / COLS, index % COLS)
    }

    /// The neighbouring coordinate across `side`, if it is on the board
    pub fn neighbor(&self, side: Side) -> Option<Coord> {
        let next = match side {
            Side::North => Coord::new(self.row.checked_sub(1)?, self.col),
            Side::East => Coord::new(self.row, self.col + 1),
            Side::South => Coord::new(self.row + 1, self.col),
            Side::West => Coord::new(self.row, self.col.checked_sub(1)?),
        };
        next.in_bounds().then_some(next)
    }

    /// All on-board neighbours, paired with the side they lie across
    pub fn neighbors(&self) -> impl Iterator<Item = (Side, Coord)> + '_ {
        Side::ALL
            .into_iter()
            .filter_map(move |side| self.neighbor(side).map(|n| (side, n)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
