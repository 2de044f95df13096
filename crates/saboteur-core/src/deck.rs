//! Draw piles.
//!
//! Both the path deck and the gold deck are a [`Deck`]: shuffled once when
//! built, then only ever drawn from the top.

use crate::game::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered pile of cards, drawn from the top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck<T> {
    /// The top of the pile is the end of the vector
    cards: Vec<T>,
}

impl<T> Deck<T> {
    /// Shuffle `cards` into a new deck
    pub fn shuffled<R: Rng + ?Sized>(mut cards: Vec<T>, rng: &mut R) -> Self {
        cards.shuffle(rng);
        Self { cards }
    }

    /// Build a deck that deals `cards` in the given order, first card first
    pub fn stacked(mut cards: Vec<T>) -> Self {
        cards.reverse();
        Self { cards }
    }

    /// Take the top card
    pub fn draw(&mut self) -> Result<T, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Look at the top card without taking it
    pub fn peek(&self) -> Option<&T> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<T> Default for Deck<T> {
    fn default() -> Self {
        Self { cards: Vec::new() }
    }
}
