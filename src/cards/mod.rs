//! Cards, hands, and decks.
//!
//! ## Spells vs unit tokens
//!
//! Hands mix two kinds of item:
//! - `SpellKind`: a one-shot effect, consumed when played
//! - `UnitKind` tokens: consumed when the unit is deployed
//!
//! Each player draws from two decks, one per kind.

pub mod spell;
pub mod hand;
pub mod deck;

pub use spell::SpellKind;
pub use hand::{Hand, HandItem};
pub use deck::Deck;
