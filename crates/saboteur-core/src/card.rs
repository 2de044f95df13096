//! Cards and tiles.
//!
//! This module contains:
//! - Tile openings and path tile descriptors
//! - The card sum type covering path, map, rockfall and tool cards
//! - Gold cards and goal treasures
//! - The standard deck compositions

use crate::grid::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a tile presents on one of its sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opening {
    /// A tunnel that continues through the tile
    Path,
    /// Solid rock
    Rock,
    /// A tunnel stub that stops inside the tile
    DeadEnd,
}

impl Opening {
    /// Whether a neighbouring tunnel can meet this side.
    /// Dead-end stubs line up with paths even though they carry nothing onward.
    pub fn is_open(self) -> bool {
        !matches!(self, Opening::Rock)
    }

    /// Two facing sides agree when both are open or both are rock
    pub fn matches(self, other: Opening) -> bool {
        self.is_open() == other.is_open()
    }
}

/// Category of a path tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileCategory {
    /// Ordinary tunnel, every open side connects
    Pathway,
    /// Tunnel ends inside the tile
    DeadEnd,
}

/// Default heuristic weight attached to every tile
pub const DEFAULT_TILE_WEIGHT: f32 = 1.0;

/// Immutable description of a path tile's four sides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathTile {
    /// Openings in `Side::ALL` order (north, east, south, west)
    pub openings: [Opening; 4],
    pub category: TileCategory,
    /// Hint for automated players, never read by the rules
    pub weight: f32,
}

impl PathTile {
    /// Create a tile from its north, east, south and west openings
    pub const fn new(
        north: Opening,
        east: Opening,
        south: Opening,
        west: Opening,
        category: TileCategory,
    ) -> Self {
        Self {
            openings: [north, east, south, west],
            category,
            weight: DEFAULT_TILE_WEIGHT,
        }
    }

    /// Four-way crossroads, also used for the start and goal cards
    pub const fn cross() -> Self {
        use Opening::Path;
        Self::new(Path, Path, Path, Path, TileCategory::Pathway)
    }

    /// Opening on the given side
    pub fn opening(&self, side: Side) -> Opening {
        self.openings[side.index()]
    }

    /// The tile turned half a circle
    pub fn rotated(&self) -> Self {
        let [n, e, s, w] = self.openings;
        Self {
            openings: [s, w, n, e],
            ..*self
        }
    }

    /// The tile as it lies on the board in the given orientation
    pub fn oriented(&self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Upright => *self,
            Orientation::Rotated => self.rotated(),
        }
    }

    pub fn is_dead_end(&self) -> bool {
        matches!(self.category, TileCategory::DeadEnd)
    }
}

/// How a path card is turned when it is laid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Upright,
    Rotated,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Upright => Orientation::Rotated,
            Orientation::Rotated => Orientation::Upright,
        }
    }
}

/// A path card held in a hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathCard {
    pub tile: PathTile,
    pub orientation: Orientation,
}

impl PathCard {
    pub fn new(tile: PathTile) -> Self {
        Self {
            tile,
            orientation: Orientation::Upright,
        }
    }

    /// Openings the card would present if laid now
    pub fn resolved(&self) -> PathTile {
        self.tile.oriented(self.orientation)
    }
}

/// Player tools that can be broken and repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tool {
    Pick,
    Lantern,
    Cart,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pick, Tool::Lantern, Tool::Cart];
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Pick => "pick",
            Tool::Lantern => "lantern",
            Tool::Cart => "cart",
        };
        f.write_str(name)
    }
}

/// Unique identifier of a card within one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a card does when played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardKind {
    /// Lay a tunnel tile on the board
    Path(PathCard),
    /// Peek at one goal card
    Map,
    /// Remove a laid tile from the board
    Rockfall,
    /// Break another player's tool
    Sabotage(Tool),
    /// Mend any one of the listed tools
    Repair(Vec<Tool>),
}

impl CardKind {
    /// Board cards target a cell, the rest target a player
    pub fn is_board_card(&self) -> bool {
        match self {
            CardKind::Path(_) | CardKind::Map | CardKind::Rockfall => true,
            CardKind::Sabotage(_) | CardKind::Repair(_) => false,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::Path(card) if card.tile.is_dead_end() => f.write_str("dead-end"),
            CardKind::Path(_) => f.write_str("path"),
            CardKind::Map => f.write_str("map"),
            CardKind::Rockfall => f.write_str("rockfall"),
            CardKind::Sabotage(tool) => write!(f, "broken {tool}"),
            CardKind::Repair(tools) => {
                let names: Vec<String> = tools.iter().map(Tool::to_string).collect();
                write!(f, "repair {}", names.join("/"))
            }
        }
    }
}

/// A card in the draw deck or in a hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    pub fn new(id: u32, kind: CardKind) -> Self {
        Self {
            id: CardId(id),
            kind,
        }
    }

    pub fn path(id: u32, tile: PathTile) -> Self {
        Self::new(id, CardKind::Path(PathCard::new(tile)))
    }

    pub fn is_board_card(&self) -> bool {
        self.kind.is_board_card()
    }

    /// Create the standard 67-card draw deck, unshuffled
    pub fn standard_deck() -> Vec<Card> {
        use Opening::{DeadEnd as D, Path as P, Rock as R};
        use TileCategory::{DeadEnd, Pathway};

        fn add_tiles(kinds: &mut Vec<CardKind>, count: usize, tile: PathTile) {
            kinds.extend(std::iter::repeat(CardKind::Path(PathCard::new(tile))).take(count));
        }

        let mut kinds: Vec<CardKind> = Vec::with_capacity(67);

        // 31 pathway tiles
        add_tiles(&mut kinds, 5, PathTile::new(P, P, P, P, Pathway));
        add_tiles(&mut kinds, 5, PathTile::new(R, P, P, P, Pathway));
        add_tiles(&mut kinds, 5, PathTile::new(P, R, P, P, Pathway));
        add_tiles(&mut kinds, 3, PathTile::new(R, P, R, P, Pathway));
        add_tiles(&mut kinds, 4, PathTile::new(P, R, P, R, Pathway));
        add_tiles(&mut kinds, 5, PathTile::new(R, R, P, P, Pathway));
        add_tiles(&mut kinds, 4, PathTile::new(R, P, P, R, Pathway));

        // 9 dead ends, one of each shape
        for tile in [
            PathTile::new(D, D, D, D, DeadEnd),
            PathTile::new(R, D, D, D, DeadEnd),
            PathTile::new(D, R, D, D, DeadEnd),
            PathTile::new(R, D, R, D, DeadEnd),
            PathTile::new(D, R, D, R, DeadEnd),
            PathTile::new(R, R, D, D, DeadEnd),
            PathTile::new(R, D, D, R, DeadEnd),
            PathTile::new(R, R, D, R, DeadEnd),
            PathTile::new(R, R, R, D, DeadEnd),
        ] {
            add_tiles(&mut kinds, 1, tile);
        }

        // 27 action cards
        kinds.extend(std::iter::repeat(CardKind::Map).take(6));
        kinds.extend(std::iter::repeat(CardKind::Rockfall).take(3));
        for tool in Tool::ALL {
            kinds.extend(std::iter::repeat(CardKind::Sabotage(tool)).take(3));
            kinds.extend(std::iter::repeat(CardKind::Repair(vec![tool])).take(2));
        }
        kinds.push(CardKind::Repair(vec![Tool::Pick, Tool::Lantern]));
        kinds.push(CardKind::Repair(vec![Tool::Pick, Tool::Cart]));
        kinds.push(CardKind::Repair(vec![Tool::Lantern, Tool::Cart]));

        kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Card::new(i as u32 + 1, kind))
            .collect()
    }
}

/// A gold nugget card, revealed when the game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldCard(pub u8);

impl GoldCard {
    /// Create the standard 28-card gold deck, unshuffled
    pub fn standard_deck() -> Vec<GoldCard> {
        let mut deck = Vec::with_capacity(28);
        deck.extend(std::iter::repeat(GoldCard(3)).take(4));
        deck.extend(std::iter::repeat(GoldCard(2)).take(8));
        deck.extend(std::iter::repeat(GoldCard(1)).take(16));
        deck
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// What lies under a goal card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Treasure {
    Gold,
    Coal,
}
