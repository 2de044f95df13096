//! Card targets and the notifications the engine publishes.
//!
//! A presentation layer asks for [`Target`]s, issues commands, and learns
//! about the outcome through a [`GameObserver`].

use crate::card::CardId;
use crate::game::GameOutcome;
use crate::grid::Coord;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Something a card can be played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A board cell, for path, map and rockfall cards
    Cell(Coord),
    /// Another player, for sabotage and repair cards
    Player(PlayerId),
}

/// Notifications published to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new player is in turn
    TurnChanged { player: PlayerId },

    /// The pending card changed; `card` is `None` once the selection clears
    SelectionChanged {
        card: Option<CardId>,
        targets: Vec<Target>,
    },

    /// The game is over
    GameEnded(GameOutcome),
}

impl GameEvent {
    /// Deliver this event to the matching observer callback
    pub fn notify(&self, observer: &mut dyn GameObserver) {
        match self {
            GameEvent::TurnChanged { player } => observer.turn_changed(*player),
            GameEvent::SelectionChanged { card, targets } => {
                observer.selection_changed(*card, targets)
            }
            GameEvent::GameEnded(outcome) => observer.game_ended(outcome),
        }
    }
}

/// Receives engine notifications. Every callback defaults to doing nothing.
pub trait GameObserver {
    fn turn_changed(&mut self, _player: PlayerId) {}

    fn selection_changed(&mut self, _card: Option<CardId>, _targets: &[Target]) {}

    fn game_ended(&mut self, _outcome: &GameOutcome) {}
}

impl<O: GameObserver + ?Sized> GameObserver for Rc<RefCell<O>> {
    fn turn_changed(&mut self, player: PlayerId) {
        self.borrow_mut().turn_changed(player);
    }

    fn selection_changed(&mut self, card: Option<CardId>, targets: &[Target]) {
        self.borrow_mut().selection_changed(card, targets);
    }

    fn game_ended(&mut self, outcome: &GameOutcome) {
        self.borrow_mut().game_ended(outcome);
    }
}

/// Observer that keeps every event it receives, in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for EventLog {
    fn turn_changed(&mut self, player: PlayerId) {
        self.events.push(GameEvent::TurnChanged { player });
    }

    fn selection_changed(&mut self, card: Option<CardId>, targets: &[Target]) {
        self.events.push(GameEvent::SelectionChanged {
            card,
            targets: targets.to_vec(),
        });
    }

    fn game_ended(&mut self, outcome: &GameOutcome) {
        self.events.push(GameEvent::GameEnded(outcome.clone()));
    }
}
