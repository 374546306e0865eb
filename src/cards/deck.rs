//! Draw piles.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// A draw pile. The top of the deck is the end of the vec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<T> {
    cards: Vec<T>,
}

impl<T> Default for Deck<T> {
    fn default() -> Self {
        Self { cards: Vec::new() }
    }
}

impl<T: Clone> Deck<T> {
    /// Build a deck holding `copies` of each entry in `pool`, shuffled.
    pub fn from_pool(pool: &[T], copies: usize, rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(pool.len() * copies);
        for _ in 0..copies {
            cards.extend_from_slice(pool);
        }
        rng.shuffle(&mut cards);
        Self { cards }
    }
}

impl<T> Deck<T> {
    /// Create a deck in the given order (last element on top).
    #[must_use]
    pub fn from_cards(cards: Vec<T>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<T> {
        self.cards.pop()
    }

    /// Return a card to the top of the deck.
    pub fn put_back(&mut self, card: T) {
        self.cards.push(card);
    }

    /// Look at the top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.cards.last()
    }
}
