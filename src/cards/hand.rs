//! Player hands.
//!
//! A hand holds both spell cards and unit tokens, in draw order, up to a
//! fixed capacity shared by the two kinds. Spells and tokens are indexed
//! separately: "spell 0" is the first spell in the hand regardless of how
//! many tokens precede it.

use serde::{Deserialize, Serialize};

use super::spell::SpellKind;
use crate::units::UnitKind;

/// An item held in hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandItem {
    Spell(SpellKind),
    Unit(UnitKind),
}

/// A bounded, ordered hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    items: Vec<HandItem>,
    capacity: usize,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// All items in draw order.
    #[must_use]
    pub fn items(&self) -> &[HandItem] {
        &self.items
    }

    /// Add an item. Gives the item back if the hand is full.
    pub fn push(&mut self, item: HandItem) -> Result<(), HandItem> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Spell cards in hand order.
    pub fn spells(&self) -> impl Iterator<Item = SpellKind> + '_ {
        self.items.iter().filter_map(|item| match item {
            HandItem::Spell(spell) => Some(*spell),
            HandItem::Unit(_) => None,
        })
    }

    /// Unit tokens in hand order.
    pub fn units(&self) -> impl Iterator<Item = UnitKind> + '_ {
        self.items.iter().filter_map(|item| match item {
            HandItem::Unit(kind) => Some(*kind),
            HandItem::Spell(_) => None,
        })
    }

    #[must_use]
    pub fn spell_count(&self) -> usize {
        self.spells().count()
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units().count()
    }

    /// The `index`-th spell card.
    #[must_use]
    pub fn spell(&self, index: usize) -> Option<SpellKind> {
        self.spells().nth(index)
    }

    /// The `index`-th unit token.
    #[must_use]
    pub fn unit(&self, index: usize) -> Option<UnitKind> {
        self.units().nth(index)
    }

    #[must_use]
    pub fn contains(&self, item: HandItem) -> bool {
        self.items.contains(&item)
    }

    /// Remove the first matching item.
    ///
    /// Returns true if the item was found and removed.
    pub fn remove(&mut self, item: HandItem) -> bool {
        if let Some(pos) = self.items.iter().position(|&i| i == item) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }
}
