//! Saboteur - a hidden-role tunnelling card game engine
//!
//! This crate provides the core game logic, including:
//! - Grid coordinates for the 7 x 11 tunnel board
//! - Path tiles, action cards and the standard decks
//! - Board connectivity: where tiles may go and whether the gold is reached
//! - Player state: hidden role, hand and broken tools
//! - Turn engine with full rule enforcement and observer notifications
//!
//! # Architecture
//!
//! The engine is synchronous and does no I/O. A presentation layer asks
//! [`GameState::legal_targets`] where a card may go, issues commands, and
//! learns about turn changes and the end of the game through a
//! [`GameObserver`].
//!
//! # Modules
//!
//! - [`grid`]: Board coordinates and sides
//! - [`card`]: Tiles, cards and deck composition
//! - [`board`]: Tunnel grid with start and goal cards
//! - [`deck`]: Draw piles
//! - [`player`]: Roles, hands and tools
//! - [`actions`]: Card targets and observer notifications
//! - [`config`]: Game setup and rule tables
//! - [`game`]: Game state machine

pub mod actions;
pub mod board;
pub mod card;
pub mod config;
pub mod deck;
pub mod game;
pub mod grid;
pub mod player;

// Re-export commonly used types
pub use actions::{EventLog, GameEvent, GameObserver, Target};
pub use board::{Board, Cell, CellContent, GoalCard, GOALS, START};
pub use card::{
    Card, CardId, CardKind, GoldCard, Opening, Orientation, PathCard, PathTile, TileCategory,
    Tool, Treasure,
};
pub use config::{clamp_player_count, GameConfig, PlayerCount, MAX_PLAYERS, MIN_PLAYERS};
pub use deck::Deck;
pub use game::{EndReason, GameError, GameOutcome, GamePhase, GameState};
pub use grid::{Coord, Side, COLS, ROWS};
pub use player::{Player, PlayerId, Role};
