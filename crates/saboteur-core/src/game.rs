//! Core game state machine.
//!
//! This module contains the main `GameState` struct: it owns the board, the
//! decks and the players, validates every command before touching any of
//! them, rotates turns and decides when the game is over.

use crate::actions::{GameEvent, GameObserver, Target};
use crate::board::Board;
use crate::card::{Card, CardId, CardKind, GoldCard, Orientation, Tool};
use crate::config::{clamp_player_count, hand_size, GameConfig};
use crate::deck::Deck;
use crate::grid::Coord;
use crate::player::{Player, PlayerId, Role};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Where the game is in its select-then-target cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// The current player has not picked a card yet
    AwaitingSelection,
    /// A card is picked and its targets have been published
    AwaitingTarget { card: CardId },
    /// No further commands are accepted
    GameOver,
}

/// Errors that can occur when applying commands
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Tile does not fit there")]
    IllegalPlacement,

    #[error("Card cannot be played on that target")]
    IllegalTarget,

    #[error("Card must be played on a player")]
    NotABoardCard,

    #[error("Card must be played on the board")]
    IsABoardCard,

    #[error("Card is not a path card")]
    NotAPathCard,

    #[error("The {0} is already broken")]
    AlreadySabotaged(Tool),

    #[error("None of those tools are broken")]
    ToolsIntact,

    #[error("A broken tool prevents laying path cards")]
    ToolBroken,

    #[error("No card at hand position {0}")]
    IndexOutOfRange(usize),

    #[error("Card {0} is not in the current hand")]
    CardNotInHand(CardId),

    #[error("Deck is empty")]
    EmptyDeck,

    #[error("Game is over")]
    GameOver,

    #[error("A game needs at least one player")]
    NoPlayers,
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The tunnel reached the gold
    GoldReached,
    /// A player needed to draw from an empty deck
    DeckExhausted,
}

/// Final result of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// The side that won
    pub winner: Role,
    pub reason: EndReason,
    /// Value of the gold card turned over at the end
    pub gold: Option<u8>,
}

/// Registered observers. Never serialized or compared.
#[derive(Default)]
pub struct Observers(Vec<Box<dyn GameObserver>>);

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observers({})", self.0.len())
    }
}

/// The complete game state
#[derive(Debug, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    current_player: PlayerId,
    draw_deck: Deck<Card>,
    gold_deck: Deck<GoldCard>,
    /// Card picked in a two-step select-then-target flow
    selected_card: Option<CardId>,
    phase: GamePhase,
    outcome: Option<GameOutcome>,
    /// Turns completed so far
    turn_number: u32,
    /// Random number generator seed (for deterministic replays)
    seed: u64,
    #[serde(skip)]
    observers: Observers,
}

impl GameState {
    /// Create a new game. The player count is clamped silently; callers that
    /// want to warn should check [`clamp_player_count`] first.
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let count = clamp_player_count(config.player_count).count;

        let players: Vec<Player> = Role::deal(count, &mut rng)
            .into_iter()
            .zip(config.names_for(count))
            .enumerate()
            .map(|(id, (role, name))| Player::new(id, name, role))
            .collect();

        let draw_deck = Deck::shuffled(Card::standard_deck(), &mut rng);
        let gold_deck = Deck::shuffled(GoldCard::standard_deck(), &mut rng);
        let board = Board::standard_with_rng(&mut rng);
        let first_player = rng.gen_range(0..count);

        let mut state = Self::assemble(board, players, draw_deck, gold_deck, first_player);
        state.seed = seed;
        state.deal(hand_size(count));

        info!(players = count, seed, first_player, "game started");
        state
    }

    /// Assemble a game from prepared pieces.
    ///
    /// Players are renumbered by their position in `players` and keep
    /// whatever hands they already hold. The first player's hand is opened
    /// and every other hand is closed.
    pub fn from_parts(
        board: Board,
        players: Vec<Player>,
        draw_deck: Deck<Card>,
        gold_deck: Deck<GoldCard>,
        first_player: PlayerId,
    ) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        Ok(Self::assemble(board, players, draw_deck, gold_deck, first_player))
    }

    /// `players` must not be empty
    fn assemble(
        board: Board,
        mut players: Vec<Player>,
        draw_deck: Deck<Card>,
        gold_deck: Deck<GoldCard>,
        first_player: PlayerId,
    ) -> Self {
        let first_player = first_player % players.len();
        for (seat, player) in players.iter_mut().enumerate() {
            player.id = seat;
            if seat == first_player {
                player.open_hand();
            } else {
                player.close_hand();
            }
        }

        Self {
            board,
            players,
            current_player: first_player,
            draw_deck,
            gold_deck,
            selected_card: None,
            phase: GamePhase::AwaitingSelection,
            outcome: None,
            turn_number: 0,
            seed: 0,
            observers: Observers::default(),
        }
    }

    /// Deal `per_player` cards to each player, one round at a time
    fn deal(&mut self, per_player: usize) {
        for _ in 0..per_player {
            for player in &mut self.players {
                if let Ok(card) = self.draw_deck.draw() {
                    player.give_card(card);
                }
            }
        }
    }

    /// Register an observer for turn, selection and game-end notifications
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.0.push(observer);
    }

    fn notify(&mut self, event: GameEvent) {
        for observer in self.observers.0.iter_mut() {
            event.notify(observer.as_mut());
        }
    }

    // ==================== Queries ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Index of the player in turn
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    fn actor(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn selected_card(&self) -> Option<CardId> {
        self.selected_card
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cards left in the draw deck
    pub fn draw_pile_len(&self) -> usize {
        self.draw_deck.len()
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Get the winning side if the game is finished
    pub fn winner(&self) -> Option<Role> {
        self.outcome.as_ref().map(|o| o.winner)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Id of the card at `index` in the current player's hand
    pub fn card_at(&self, index: usize) -> Result<CardId, GameError> {
        self.actor()
            .peek_card_at(index)
            .map(|c| c.id)
            .ok_or(GameError::IndexOutOfRange(index))
    }

    /// A card from the current player's hand
    fn held_card(&self, card: CardId) -> Result<&Card, GameError> {
        self.actor()
            .card(card)
            .ok_or(GameError::CardNotInHand(card))
    }

    /// Where a card of this kind could go for the current player
    pub fn targets_for(&self, kind: &CardKind) -> Vec<Target> {
        match kind {
            CardKind::Path(_) if self.actor().is_sabotaged() => Vec::new(),
            CardKind::Path(_) => cell_targets(self.board.playable_cells()),
            CardKind::Map => cell_targets(self.board.goal_cells()),
            CardKind::Rockfall => cell_targets(self.board.filled_cells()),
            CardKind::Sabotage(_) | CardKind::Repair(_) => self
                .players
                .iter()
                .filter(|p| p.id != self.current_player)
                .map(|p| Target::Player(p.id))
                .collect(),
        }
    }

    /// Legal targets for a card in the current player's hand
    pub fn legal_targets(&self, card: CardId) -> Result<Vec<Target>, GameError> {
        self.ensure_running()?;
        let card = self.held_card(card)?;
        Ok(self.targets_for(&card.kind))
    }

    // ==================== Selection ====================

    /// Mark a card as pending and publish its targets.
    /// Any earlier selection is replaced.
    pub fn select_card(&mut self, card: CardId) -> Result<Vec<Target>, GameError> {
        let targets = self.legal_targets(card)?;
        self.selected_card = Some(card);
        self.phase = GamePhase::AwaitingTarget { card };
        self.notify(GameEvent::SelectionChanged {
            card: Some(card),
            targets: targets.clone(),
        });
        Ok(targets)
    }

    /// Drop the pending card, if any
    pub fn clear_selection(&mut self) {
        if self.selected_card.take().is_some() {
            if !self.is_finished() {
                self.phase = GamePhase::AwaitingSelection;
            }
            self.notify(GameEvent::SelectionChanged {
                card: None,
                targets: Vec::new(),
            });
        }
    }

    /// Turn a path card in the current hand around
    pub fn rotate_card(&mut self, card: CardId) -> Result<Orientation, GameError> {
        self.ensure_running()?;
        let held = self.players[self.current_player]
            .card_mut(card)
            .ok_or(GameError::CardNotInHand(card))?;
        match &mut held.kind {
            CardKind::Path(path) => {
                path.orientation = path.orientation.flipped();
                Ok(path.orientation)
            }
            _ => Err(GameError::NotAPathCard),
        }
    }

    // ==================== Commands ====================

    /// Play a path, map or rockfall card on a board cell
    pub fn play_card_on_board(&mut self, card: CardId, cell: Coord) -> Result<(), GameError> {
        self.ensure_running()?;
        let actor = self.current_player;
        let kind = self.held_card(card)?.kind.clone();

        if !kind.is_board_card() {
            return Err(GameError::NotABoardCard);
        }
        if matches!(kind, CardKind::Path(_)) && self.actor().is_sabotaged() {
            return Err(GameError::ToolBroken);
        }
        if !self.targets_for(&kind).contains(&Target::Cell(cell)) {
            return Err(GameError::IllegalTarget);
        }

        match kind {
            CardKind::Path(path) => {
                let flipped = self.board.place_tile(cell, path.tile, path.orientation)?;
                debug!(player = actor, card = %card, %cell, ?flipped, "path card laid");
            }
            CardKind::Map => {
                let treasure = self.board.reveal_goal(cell)?;
                self.players[actor].learn_goal(cell, treasure);
                debug!(player = actor, card = %card, %cell, "goal peeked");
            }
            CardKind::Rockfall => {
                self.board.destroy_tile(cell)?;
                debug!(player = actor, card = %card, %cell, "tile destroyed");
            }
            CardKind::Sabotage(_) | CardKind::Repair(_) => return Err(GameError::NotABoardCard),
        }

        self.remove_from_hand(actor, card)?;
        self.advance_turn();
        Ok(())
    }

    /// Play a sabotage or repair card on another player
    pub fn play_card_on_player(
        &mut self,
        card: CardId,
        target: PlayerId,
    ) -> Result<(), GameError> {
        self.ensure_running()?;
        let actor = self.current_player;
        let kind = self.held_card(card)?.kind.clone();

        if kind.is_board_card() {
            return Err(GameError::IsABoardCard);
        }
        if !self.targets_for(&kind).contains(&Target::Player(target)) {
            return Err(GameError::IllegalTarget);
        }

        match kind {
            CardKind::Sabotage(tool) => {
                self.players[target].sabotage_tool(tool)?;
                debug!(player = actor, victim = target, %tool, "tool sabotaged");
            }
            CardKind::Repair(tools) => {
                self.players[target].repair_tools(&tools)?;
                debug!(player = actor, mended = target, ?tools, "tools repaired");
            }
            CardKind::Path(_) | CardKind::Map | CardKind::Rockfall => {
                return Err(GameError::IsABoardCard)
            }
        }

        self.remove_from_hand(actor, card)?;
        self.advance_turn();
        Ok(())
    }

    /// Pass the turn by discarding a card face down
    pub fn discard_card(&mut self, card: CardId) -> Result<(), GameError> {
        self.ensure_running()?;
        let actor = self.current_player;
        let discarded = self.remove_from_hand(actor, card)?;
        self.players[actor].add_discard(discarded);
        debug!(player = actor, card = %card, "card discarded");
        self.advance_turn();
        Ok(())
    }

    fn remove_from_hand(&mut self, player: PlayerId, card: CardId) -> Result<Card, GameError> {
        let player = &mut self.players[player];
        let index = player
            .card_index(card)
            .ok_or(GameError::CardNotInHand(card))?;
        player.take_card_at(index)
    }

    // ==================== Turn Management ====================

    /// End the current turn.
    ///
    /// A reached gold goal ends the game before the acting player draws.
    /// Otherwise the actor draws a replacement card (an empty deck ends the
    /// game for the saboteurs) and play passes to the next seat.
    pub fn advance_turn(&mut self) {
        if self.is_finished() {
            return;
        }

        if self.board.is_gold_goal_reached() {
            self.finish(Role::GoldMiner, EndReason::GoldReached);
            return;
        }

        let outgoing = self.current_player;
        match self.draw_deck.draw() {
            Ok(card) => self.players[outgoing].give_card(card),
            Err(_) => {
                self.finish(Role::Saboteur, EndReason::DeckExhausted);
                return;
            }
        }

        self.players[outgoing].close_hand();
        self.current_player = (outgoing + 1) % self.players.len();
        self.players[self.current_player].open_hand();
        self.turn_number += 1;
        self.selected_card = None;
        self.phase = GamePhase::AwaitingSelection;

        debug!(
            from = outgoing,
            to = self.current_player,
            turn = self.turn_number,
            deck = self.draw_deck.len(),
            "turn changed"
        );
        self.notify(GameEvent::TurnChanged {
            player: self.current_player,
        });
    }

    fn finish(&mut self, winner: Role, reason: EndReason) {
        let gold = self.gold_deck.draw().ok().map(|g| g.value());
        let outcome = GameOutcome {
            winner,
            reason,
            gold,
        };

        self.outcome = Some(outcome.clone());
        self.phase = GamePhase::GameOver;
        self.selected_card = None;

        info!(winner = winner.side_name(), ?reason, ?gold, "game over");
        self.notify(GameEvent::GameEnded(outcome));
    }
}

fn cell_targets(cells: Vec<Coord>) -> Vec<Target> {
    cells.into_iter().map(Target::Cell).collect()
}
