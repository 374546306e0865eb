//! Spell cards.
//!
//! Spells are stateless one-shot cards: two Fireballs in a hand are
//! interchangeable, so a card is identified by its kind alone. Effects are
//! resolved by `crate::effects`.

use serde::{Deserialize, Serialize};

/// Spell card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpellKind {
    /// Damage and burn a unit, and set its cell on fire.
    Fireball,
    /// Stop a unit from moving or attacking for a few turns.
    Freeze,
    /// Permanently raise a unit's attack.
    StrengthUp,
    /// Heavy damage on one cell, knocking back its neighbours.
    MeteoriteStrike,
    /// Cut the target owner's action points for several turns.
    ActionBlock,
    /// Move a friendly unit anywhere empty.
    Teleport,
}

impl SpellKind {
    /// Every spell, in type-id order.
    pub const ALL: [SpellKind; 6] = [
        SpellKind::Fireball,
        SpellKind::Freeze,
        SpellKind::StrengthUp,
        SpellKind::MeteoriteStrike,
        SpellKind::ActionBlock,
        SpellKind::Teleport,
    ];

    /// Action point cost to play.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            SpellKind::Fireball | SpellKind::Freeze | SpellKind::StrengthUp => 1,
            SpellKind::MeteoriteStrike | SpellKind::Teleport => 2,
            SpellKind::ActionBlock => 3,
        }
    }

    /// Stable numeric id used in observations (0 is reserved for "empty").
    #[must_use]
    pub const fn type_id(self) -> u8 {
        match self {
            SpellKind::Fireball => 1,
            SpellKind::Freeze => 2,
            SpellKind::StrengthUp => 3,
            SpellKind::MeteoriteStrike => 4,
            SpellKind::ActionBlock => 5,
            SpellKind::Teleport => 6,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SpellKind::Fireball => "Fireball",
            SpellKind::Freeze => "Freeze",
            SpellKind::StrengthUp => "Strength Up",
            SpellKind::MeteoriteStrike => "Meteorite Strike",
            SpellKind::ActionBlock => "Action Block",
            SpellKind::Teleport => "Teleport",
        }
    }
}

impl std::fmt::Display for SpellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Cost: {})", self.name(), self.cost())
    }
}
