//! Text commands typed at the hotseat prompt.
//!
//! Hand positions and seats are entered 1-based, the way they are printed.
//! Board cells are entered as `row col`, matching the board's axis labels.

use saboteur_core::Coord;
use thiserror::Error;

/// Commands read from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the board
    Show,

    /// Print the current player's hand
    Hand,

    /// Pick a card and list where it can go
    Select { card: usize },

    /// Drop the picked card
    Cancel,

    /// Turn a path card around
    Rotate { card: usize },

    /// Play a card on a board cell
    Play { card: usize, cell: Coord },

    /// Play a card on another player
    Target { card: usize, player: usize },

    /// Discard a card face down and pass
    Discard { card: usize },

    /// Dump the full game state as JSON, hidden parts included.
    /// Only honoured when debugging is enabled.
    State,

    Help,

    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Not a valid {what}: {value}")]
    InvalidNumber { what: &'static str, value: String },

    #[error("Unexpected input after command: {0}")]
    TrailingInput(String),
}

impl Command {
    /// Parse one line of input
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseError::Empty)?.to_lowercase();

        let command = match name.as_str() {
            "show" | "board" => Command::Show,
            "hand" => Command::Hand,
            "select" | "sel" => Command::Select {
                card: position(&mut words, "card")?,
            },
            "cancel" => Command::Cancel,
            "rotate" | "rot" => Command::Rotate {
                card: position(&mut words, "card")?,
            },
            "play" => {
                let card = position(&mut words, "card")?;
                let row = number(&mut words, "row")?;
                let col = number(&mut words, "column")?;
                Command::Play {
                    card,
                    cell: Coord::new(row, col),
                }
            }
            "target" | "on" => Command::Target {
                card: position(&mut words, "card")?,
                player: position(&mut words, "player")?,
            },
            "discard" | "pass" => Command::Discard {
                card: position(&mut words, "card")?,
            },
            "state" => Command::State,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseError::UnknownCommand(name)),
        };

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(ParseError::TrailingInput(rest.join(" ")));
        }
        Ok(command)
    }
}

fn number<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<usize, ParseError> {
    let word = words.next().ok_or(ParseError::MissingArgument(what))?;
    word.parse().map_err(|_| ParseError::InvalidNumber {
        what,
        value: word.to_string(),
    })
}

/// A 1-based position, returned as a 0-based index
fn position<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<usize, ParseError> {
    let word = words.next().ok_or(ParseError::MissingArgument(what))?;
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::InvalidNumber {
            what,
            value: word.to_string(),
        }),
    }
}

pub const HELP: &str = "\
Commands:
  show                    print the board
  hand                    print your hand
  select <card>           pick a card and list its targets
  cancel                  drop the picked card
  rotate <card>           turn a path card around
  play <card> <row> <col> play a card on the board
  target <card> <player>  play a sabotage or repair card on a player
  discard <card>          discard a card and pass
  help                    show this text
  quit                    leave the game";
