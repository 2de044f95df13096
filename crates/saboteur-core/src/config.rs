//! Game setup parameters and the fixed rule tables.

use serde::{Deserialize, Serialize};

/// Fewest players the rules support
pub const MIN_PLAYERS: usize = 4;

/// Most players the rules support
pub const MAX_PLAYERS: usize = 10;

/// A player count forced into the supported range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCount {
    pub count: usize,
    /// Set when the requested count was outside the range; the caller
    /// decides whether to warn about it
    pub clamped: bool,
}

/// Clamp a requested player count to `MIN_PLAYERS..=MAX_PLAYERS`
pub fn clamp_player_count(requested: usize) -> PlayerCount {
    let count = requested.clamp(MIN_PLAYERS, MAX_PLAYERS);
    PlayerCount {
        count,
        clamped: count != requested,
    }
}

/// Number of saboteurs at the table
pub fn saboteur_count(players: usize) -> usize {
    match clamp_player_count(players).count {
        4 => 1,
        5..=7 => 2,
        _ => 3,
    }
}

/// Number of cards dealt to each player
pub fn hand_size(players: usize) -> usize {
    match clamp_player_count(players).count {
        4 | 5 => 6,
        6 | 7 => 5,
        _ => 4,
    }
}

/// Parameters for a new game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Requested number of players, clamped at setup
    pub player_count: usize,
    /// Display names by seat; missing names get a default
    #[serde(default)]
    pub player_names: Vec<String>,
    /// Seed for roles, shuffles and goal placement. `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            player_names: Vec::new(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.player_names = names;
        self
    }

    /// Names for each seat of a `count`-player table
    pub fn names_for(&self, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                self.player_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Player {}", i + 1))
            })
            .collect()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MIN_PLAYERS)
    }
}
