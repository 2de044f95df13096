//! A hotseat game session: one engine driven by parsed commands.

use saboteur_core::{GameError, GameObserver, GameState, Orientation, Target};
use thiserror::Error;

use crate::command::{Command, HELP};
use crate::render;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Could not encode game state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("State dump is disabled, set SABOTEUR_DEBUG=1")]
    StateDumpDisabled,
}

/// What the driver should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Text(String),
    /// Nothing to print
    Done,
    Quit,
}

/// A local game shared by everyone at the keyboard.
pub struct Session {
    game: GameState,
    /// Cells offered for the picked card, drawn as `*` on the board
    highlights: Vec<Target>,
    /// Whether `state` may print the whole game, hidden parts included
    debug: bool,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            highlights: Vec::new(),
            debug: false,
        }
    }

    /// Allow the full JSON state dump
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.game.subscribe(observer);
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    /// Prompt naming the player in turn
    pub fn prompt(&self) -> String {
        match self.game.player(self.game.current_player()) {
            Some(player) => format!("{}> ", player.name),
            None => "> ".to_string(),
        }
    }

    /// Apply one command
    pub fn execute(&mut self, command: Command) -> Result<Reply, SessionError> {
        let reply = match command {
            Command::Show => Reply::Text(self.board()),
            Command::Hand => Reply::Text(self.hand()),
            Command::Select { card } => {
                let id = self.game.card_at(card)?;
                let targets = self.game.select_card(id)?;
                let listing = render::render_targets(&self.game, &targets);
                self.highlights = targets;
                Reply::Text(format!("{}{listing}", self.board()))
            }
            Command::Cancel => {
                self.game.clear_selection();
                self.highlights.clear();
                Reply::Done
            }
            Command::Rotate { card } => {
                let id = self.game.card_at(card)?;
                let orientation = self.game.rotate_card(id)?;
                let turned = match orientation {
                    Orientation::Upright => "upright",
                    Orientation::Rotated => "rotated",
                };
                Reply::Text(format!("card {} is now {turned}", card + 1))
            }
            Command::Play { card, cell } => {
                let id = self.game.card_at(card)?;
                self.game.play_card_on_board(id, cell)?;
                self.highlights.clear();
                Reply::Done
            }
            Command::Target { card, player } => {
                let id = self.game.card_at(card)?;
                self.game.play_card_on_player(id, player)?;
                self.highlights.clear();
                Reply::Done
            }
            Command::Discard { card } => {
                let id = self.game.card_at(card)?;
                self.game.discard_card(id)?;
                self.highlights.clear();
                Reply::Done
            }
            Command::State if !self.debug => return Err(SessionError::StateDumpDisabled),
            Command::State => Reply::Text(serde_json::to_string_pretty(&self.game)?),
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// The board with any offered cells marked
    pub fn board(&self) -> String {
        let cells: Vec<_> = self
            .highlights
            .iter()
            .filter_map(|target| match target {
                Target::Cell(coord) => Some(*coord),
                Target::Player(_) => None,
            })
            .collect();
        render::render_board(self.game.board(), &cells)
    }

    /// The current player's hand, if it is open
    pub fn hand(&self) -> String {
        match self.game.player(self.game.current_player()) {
            Some(player) if player.is_hand_open() => render::render_hand(player),
            _ => "no open hand".to_string(),
        }
    }
}
