//! Player state: role, hand and tools.
//!
//! This module contains:
//! - The two hidden roles and the seeded role draw
//! - Player struct with hand, discard pile and broken tools
//! - Private knowledge gathered from map cards

use crate::card::{Card, CardId, Tool, Treasure};
use crate::config::saboteur_count;
use crate::game::GameError;
use crate::grid::Coord;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Player identifier, the seat index at the table
pub type PlayerId = usize;

/// Hidden role dealt at the start of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Saboteur,
    GoldMiner,
}

impl Role {
    /// Deal roles for a table of `players`.
    ///
    /// Each seat becomes a saboteur with probability equal to the share of
    /// saboteur roles still undealt, so the table always ends up with exactly
    /// `saboteur_count(players)` saboteurs.
    pub fn deal<R: Rng + ?Sized>(players: usize, rng: &mut R) -> Vec<Role> {
        let mut saboteurs_left = saboteur_count(players).min(players);
        (0..players)
            .map(|seat| {
                let seats_left = players - seat;
                if rng.gen_range(0..seats_left) < saboteurs_left {
                    saboteurs_left -= 1;
                    Role::Saboteur
                } else {
                    Role::GoldMiner
                }
            })
            .collect()
    }

    /// Name of the side this role plays for
    pub fn side_name(&self) -> &'static str {
        match self {
            Role::Saboteur => "Saboteurs",
            Role::GoldMiner => "Gold Miners",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Saboteur => f.write_str("saboteur"),
            Role::GoldMiner => f.write_str("gold miner"),
        }
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index
    pub id: PlayerId,
    /// Display name
    pub name: String,
    role: Role,
    hand: Vec<Card>,
    /// Whether the hand is face up for the table
    hand_open: bool,
    discarded: Vec<Card>,
    sabotaged: BTreeSet<Tool>,
    /// Goals this player has peeked at with a map card
    known_goals: Vec<(Coord, Treasure)>,
}

impl Player {
    /// Create a new player with an empty, closed hand
    pub fn new(id: PlayerId, name: String, role: Role) -> Self {
        Self {
            id,
            name,
            role,
            hand: Vec::new(),
            hand_open: false,
            discarded: Vec::new(),
            sabotaged: BTreeSet::new(),
            known_goals: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn is_hand_open(&self) -> bool {
        self.hand_open
    }

    pub fn open_hand(&mut self) {
        self.hand_open = true;
    }

    pub fn close_hand(&mut self) {
        self.hand_open = false;
    }

    /// Add a card to the hand
    pub fn give_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove and return the card at `index`
    pub fn take_card_at(&mut self, index: usize) -> Result<Card, GameError> {
        if index >= self.hand.len() {
            return Err(GameError::IndexOutOfRange(index));
        }
        Ok(self.hand.remove(index))
    }

    /// Look at the card at `index` without removing it
    pub fn peek_card_at(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Position of a card in the hand
    pub fn card_index(&self, id: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.hand.iter_mut().find(|c| c.id == id)
    }

    /// Break one of this player's tools
    pub fn sabotage_tool(&mut self, tool: Tool) -> Result<(), GameError> {
        if self.sabotaged.contains(&tool) {
            return Err(GameError::AlreadySabotaged(tool));
        }
        self.sabotaged.insert(tool);
        Ok(())
    }

    /// Mend every listed tool. Fails unless at least one of them is broken.
    pub fn repair_tools(&mut self, tools: &[Tool]) -> Result<(), GameError> {
        if !tools.iter().any(|t| self.sabotaged.contains(t)) {
            return Err(GameError::ToolsIntact);
        }
        for tool in tools {
            self.sabotaged.remove(tool);
        }
        Ok(())
    }

    /// Whether any tool is broken
    pub fn is_sabotaged(&self) -> bool {
        !self.sabotaged.is_empty()
    }

    pub fn is_tool_sabotaged(&self, tool: Tool) -> bool {
        self.sabotaged.contains(&tool)
    }

    pub fn sabotaged_tools(&self) -> impl Iterator<Item = Tool> + '_ {
        self.sabotaged.iter().copied()
    }

    /// Put a card on this player's discard pile
    pub fn add_discard(&mut self, card: Card) {
        self.discarded.push(card);
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    /// Remember what a map card showed
    pub fn learn_goal(&mut self, coord: Coord, treasure: Treasure) {
        self.known_goals.push((coord, treasure));
    }

    /// What this player has seen under goal cards
    pub fn known_goal(&self, coord: Coord) -> Option<Treasure> {
        self.known_goals
            .iter()
            .find(|(c, _)| *c == coord)
            .map(|(_, t)| *t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn miner() -> Player {
        Player::new(0, "Test".to_string(), Role::GoldMiner)
    }

    #[test]
    fn test_give_and_take_cards() {
        let mut player = miner();
        player.give_card(Card::new(1, CardKind::Map));
        player.give_card(Card::new(2, CardKind::Rockfall));

        assert_eq!(player.card_index(CardId(2)), Some(1));
        assert_eq!(player.peek_card_at(0).map(|c| c.id), Some(CardId(1)));

        let taken = player.take_card_at(0).unwrap();
        assert_eq!(taken.id, CardId(1));
        assert_eq!(player.hand().len(), 1);
    }

    #[test]
    fn test_take_out_of_range() {
        let mut player = miner();
        player.give_card(Card::new(1, CardKind::Map));
        assert_eq!(player.take_card_at(3), Err(GameError::IndexOutOfRange(3)));
        assert_eq!(player.hand().len(), 1);
    }

    #[test]
    fn test_sabotage_twice_is_rejected() {
        let mut player = miner();
        assert!(!player.is_sabotaged());

        player.sabotage_tool(Tool::Pick).unwrap();
        assert!(player.is_sabotaged());
        assert!(player.is_tool_sabotaged(Tool::Pick));

        let before = player.clone();
        assert_eq!(
            player.sabotage_tool(Tool::Pick),
            Err(GameError::AlreadySabotaged(Tool::Pick))
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_repair_intact_tools_is_rejected() {
        let mut player = miner();
        assert_eq!(
            player.repair_tools(&[Tool::Lantern]),
            Err(GameError::ToolsIntact)
        );
        assert_eq!(
            player.repair_tools(&[Tool::Pick, Tool::Cart]),
            Err(GameError::ToolsIntact)
        );
    }

    #[test]
    fn test_partial_repair_clears_only_broken_tool() {
        let mut player = miner();
        player.sabotage_tool(Tool::Pick).unwrap();
        player.sabotage_tool(Tool::Cart).unwrap();

        player.repair_tools(&[Tool::Pick, Tool::Lantern]).unwrap();
        assert!(!player.is_tool_sabotaged(Tool::Pick));
        assert!(!player.is_tool_sabotaged(Tool::Lantern));
        assert_eq!(player.sabotaged_tools().collect::<Vec<_>>(), vec![Tool::Cart]);
    }

    #[test]
    fn test_hand_visibility() {
        let mut player = miner();
        assert!(!player.is_hand_open());
        player.open_hand();
        assert!(player.is_hand_open());
        player.close_hand();
        assert!(!player.is_hand_open());
    }

    #[test]
    fn test_known_goals() {
        let mut player = miner();
        let goal = Coord::new(1, 9);
        assert_eq!(player.known_goal(goal), None);
        player.learn_goal(goal, Treasure::Coal);
        assert_eq!(player.known_goal(goal), Some(Treasure::Coal));
    }

    #[test]
    fn test_role_deal_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        for players in 4..=10 {
            let roles = Role::deal(players, &mut rng);
            let saboteurs = roles.iter().filter(|r| **r == Role::Saboteur).count();
            assert_eq!(roles.len(), players);
            assert_eq!(saboteurs, saboteur_count(players));
        }
    }
}
