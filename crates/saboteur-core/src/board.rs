//! Game board representation: the tunnel grid, the start card and the goals.
//!
//! This module contains:
//! - Cell contents (empty, start, laid tile, goal card)
//! - The board grid with its fixed start and goal positions
//! - Connectivity queries (playable, reachable and filled cells)
//! - Board mutation (lay a tile, clear a tile, peek at a goal)

use crate::card::{Opening, Orientation, PathTile, Treasure};
use crate::game::GameError;
use crate::grid::{Coord, Side, COLS, ROWS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Where the start card lies
pub const START: Coord = Coord::new(3, 1);

/// Where the three goal cards lie, north to south
pub const GOALS: [Coord; 3] = [Coord::new(1, 9), Coord::new(3, 9), Coord::new(5, 9)];

/// A face-down destination card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalCard {
    /// Sides the goal presents once the tunnel reaches it
    pub tile: PathTile,
    /// What lies underneath
    pub treasure: Treasure,
    /// Whether the card has been turned face up
    pub revealed: bool,
}

impl GoalCard {
    pub fn new(tile: PathTile, treasure: Treasure) -> Self {
        Self {
            tile,
            treasure,
            revealed: false,
        }
    }
}

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    /// The fully open ladder card every tunnel grows from
    Start,
    /// A path card laid by a player
    Tile(PathTile),
    Goal(GoalCard),
}

/// A single square on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub content: CellContent,
}

impl Cell {
    /// Opening on the given side, or `None` while the cell is empty
    pub fn opening(&self, side: Side) -> Option<Opening> {
        match &self.content {
            CellContent::Empty => None,
            CellContent::Start => Some(Opening::Path),
            CellContent::Tile(tile) => Some(tile.opening(side)),
            CellContent::Goal(goal) => Some(goal.tile.opening(side)),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// The laid tile, if a player put one here
    pub fn tile(&self) -> Option<&PathTile> {
        match &self.content {
            CellContent::Tile(tile) => Some(tile),
            _ => None,
        }
    }

    pub fn goal(&self) -> Option<&GoalCard> {
        match &self.content {
            CellContent::Goal(goal) => Some(goal),
            _ => None,
        }
    }
}

/// The complete game board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Row-major cell arena, indexed by `Coord::index`
    cells: Vec<Cell>,
    start: Coord,
    goals: [Coord; 3],
    gold: Coord,
}

impl Board {
    /// Create the standard board with the gold hidden under a random goal
    pub fn standard() -> Self {
        Self::standard_with_rng(&mut rand::thread_rng())
    }

    /// Create the standard board using the given RNG to hide the gold
    pub fn standard_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_gold_at(rng.gen_range(0..GOALS.len()))
    }

    /// Create the standard board with the gold under `GOALS[gold_index]`
    pub fn with_gold_at(gold_index: usize) -> Self {
        Self::with_goal_tiles(gold_index, [PathTile::cross(); 3])
    }

    /// Create a board whose goal cards present the given tiles.
    ///
    /// `gold_index` picks which of `GOALS` hides the gold; it wraps if too large.
    pub fn with_goal_tiles(gold_index: usize, goal_tiles: [PathTile; 3]) -> Self {
        let gold_index = gold_index % GOALS.len();
        let mut cells: Vec<Cell> = (0..ROWS * COLS)
            .map(|i| Cell {
                coord: Coord::from_index(i),
                content: CellContent::Empty,
            })
            .collect();

        cells[START.index()].content = CellContent::Start;
        for (i, (coord, tile)) in GOALS.iter().zip(goal_tiles).enumerate() {
            let treasure = if i == gold_index {
                Treasure::Gold
            } else {
                Treasure::Coal
            };
            cells[coord.index()].content = CellContent::Goal(GoalCard::new(tile, treasure));
        }

        Self {
            cells,
            start: START,
            goals: GOALS,
            gold: GOALS[gold_index],
        }
    }

    /// Get a cell by coordinate
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if coord.in_bounds() {
            self.cells.get(coord.index())
        } else {
            None
        }
    }

    /// Iterate over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    /// The three goal positions, whatever their state
    pub fn goal_cells(&self) -> Vec<Coord> {
        self.goals.to_vec()
    }

    /// The goal card at a coordinate
    pub fn goal(&self, coord: Coord) -> Option<&GoalCard> {
        self.cell(coord).and_then(Cell::goal)
    }

    /// Where the gold is hidden
    pub fn gold_goal(&self) -> Coord {
        self.gold
    }

    /// Every cell holding a laid tile. The start and goals never count.
    pub fn filled_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.tile().is_some())
            .map(|c| c.coord)
            .collect()
    }

    /// Cells the tunnel from the start card reaches.
    ///
    /// The walk leaves a cell only through `Path` sides and enters any
    /// neighbour whose facing side is open. A dead-end stub is entered but
    /// never left.
    pub fn reachable_cells(&self) -> BTreeSet<Coord> {
        let mut reached = BTreeSet::from([self.start]);
        let mut queue = VecDeque::from([self.start]);

        while let Some(coord) = queue.pop_front() {
            let cell = &self.cells[coord.index()];
            for (side, next) in coord.neighbors() {
                if cell.opening(side) != Some(Opening::Path) {
                    continue;
                }
                let facing = self.cells[next.index()].opening(side.opposite());
                if facing.is_some_and(Opening::is_open) && reached.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        reached
    }

    /// Cells a path card may be laid on.
    ///
    /// An empty cell qualifies when at least one occupied neighbour presents
    /// an open side toward it. Goal cards only offer cells once the tunnel
    /// has reached them.
    pub fn playable_cells(&self) -> Vec<Coord> {
        let reached = self.reachable_cells();
        self.cells
            .iter()
            .filter(|c| c.is_empty())
            .filter(|c| {
                c.coord.neighbors().any(|(side, next)| {
                    self.is_anchor(next, &reached)
                        && self.cells[next.index()]
                            .opening(side.opposite())
                            .is_some_and(Opening::is_open)
                })
            })
            .map(|c| c.coord)
            .collect()
    }

    /// Whether `coord` holds something new tiles may grow from
    fn is_anchor(&self, coord: Coord, reached: &BTreeSet<Coord>) -> bool {
        match self.cells[coord.index()].content {
            CellContent::Empty => false,
            CellContent::Start | CellContent::Tile(_) => true,
            CellContent::Goal(_) => reached.contains(&coord),
        }
    }

    /// Whether `tile` lines up with every occupied neighbour of `coord`,
    /// concealed goals included
    fn fits(&self, coord: Coord, tile: &PathTile) -> bool {
        coord.neighbors().all(|(side, next)| {
            match self.cells[next.index()].opening(side.opposite()) {
                Some(facing) => tile.opening(side).matches(facing),
                None => true,
            }
        })
    }

    /// Check whether a tile could be laid at `coord` in the given orientation
    pub fn can_place(&self, coord: Coord, tile: &PathTile, orientation: Orientation) -> bool {
        let tile = tile.oriented(orientation);
        self.playable_cells().contains(&coord) && self.fits(coord, &tile)
    }

    /// Lay a tile.
    ///
    /// Returns the goals that the tunnel reached for the first time; those
    /// are turned face up.
    pub fn place_tile(
        &mut self,
        coord: Coord,
        tile: PathTile,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, GameError> {
        let tile = tile.oriented(orientation);
        if !self.playable_cells().contains(&coord) || !self.fits(coord, &tile) {
            return Err(GameError::IllegalPlacement);
        }

        self.cells[coord.index()].content = CellContent::Tile(tile);

        let reached = self.reachable_cells();
        let mut flipped = Vec::new();
        for goal in self.goals {
            if let CellContent::Goal(card) = &mut self.cells[goal.index()].content {
                if reached.contains(&goal) && !card.revealed {
                    card.revealed = true;
                    flipped.push(goal);
                }
            }
        }
        Ok(flipped)
    }

    /// Remove a laid tile, leaving the cell empty
    pub fn destroy_tile(&mut self, coord: Coord) -> Result<PathTile, GameError> {
        let cell = self
            .cells
            .get_mut(coord.index())
            .filter(|_| coord.in_bounds())
            .ok_or(GameError::IllegalTarget)?;
        match cell.content {
            CellContent::Tile(tile) => {
                cell.content = CellContent::Empty;
                Ok(tile)
            }
            _ => Err(GameError::IllegalTarget),
        }
    }

    /// Turn a face-down goal card up and report what lies beneath
    pub fn reveal_goal(&mut self, coord: Coord) -> Result<Treasure, GameError> {
        if !coord.in_bounds() {
            return Err(GameError::IllegalTarget);
        }
        match &mut self.cells[coord.index()].content {
            CellContent::Goal(card) if !card.revealed => {
                card.revealed = true;
                Ok(card.treasure)
            }
            _ => Err(GameError::IllegalTarget),
        }
    }

    /// Whether an unbroken tunnel runs from the start into the gold goal
    pub fn is_gold_goal_reached(&self) -> bool {
        self.reachable_cells().contains(&self.gold)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_gold_at(0)
    }
}
