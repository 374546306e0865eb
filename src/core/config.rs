//! Rules configuration.
//!
//! Every tunable number in the engine lives in `RulesConfig`. The default
//! is the reference ruleset (7x10 board, 7 action points per turn, ten-item
//! hands). Builders and tests override individual values with the `with_*`
//! setters.
//!
//! ```
//! use grids_tactics::core::RulesConfig;
//!
//! let config = RulesConfig::default().with_board(5, 6).with_action_points(3);
//! assert_eq!(config.rows, 5);
//! assert_eq!(config.action_points, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::grid::Grid;
use crate::cards::SpellKind;
use crate::units::UnitKind;

/// Numeric tuning for spell effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellTuning {
    /// Immediate damage dealt by Fireball to a unit target.
    pub fireball_damage: u32,

    /// Burn countdown applied by Fireball to a unit target.
    pub fireball_burn_turns: u32,

    /// Lifetime of the fire tile Fireball leaves on its target cell.
    pub fire_tile_turns: u32,

    /// Frozen countdown applied by Freeze.
    pub freeze_turns: u32,

    /// Permanent attack bonus granted by Strength Up.
    pub strength_bonus: u32,

    /// Damage dealt by Meteorite Strike to the unit on the impact cell.
    pub meteorite_damage: u32,

    /// Blocked-turn counter applied by Action Block to the target's owner.
    pub action_block_turns: u32,
}

impl Default for SpellTuning {
    fn default() -> Self {
        Self {
            fireball_damage: 3,
            fireball_burn_turns: 3,
            fire_tile_turns: 4,
            freeze_turns: 4,
            strength_bonus: 10,
            meteorite_damage: 40,
            action_block_turns: 3,
        }
    }
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Board rows.
    pub rows: i32,

    /// Board columns.
    pub cols: i32,

    /// Maximum number of items (spells and unit tokens together) in a hand.
    pub hand_capacity: usize,

    /// Action points granted at the start of a normal turn.
    pub action_points: u32,

    /// Action points granted while the player is under Action Block.
    pub blocked_action_points: u32,

    /// Cost of drawing one card from either deck.
    pub draw_cost: u32,

    /// Damage taken at end of turn by a burning unit.
    pub burn_damage: u32,

    /// Damage taken at end of turn by a unit standing on a fire tile.
    pub fire_damage: u32,

    /// Spell cards drawn into each opening hand.
    pub starting_spells: usize,

    /// Unit tokens drawn into each opening hand.
    pub starting_units: usize,

    /// Copies of each pool entry in a player's decks.
    pub deck_copies: usize,

    /// Spells that make up each spell deck.
    pub spell_pool: Vec<SpellKind>,

    /// Archetypes that make up each unit deck.
    pub unit_pool: Vec<UnitKind>,

    /// Spell effect numbers.
    pub spells: SpellTuning,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rows: 7,
            cols: 10,
            hand_capacity: 10,
            action_points: 7,
            blocked_action_points: 4,
            draw_cost: 1,
            burn_damage: 10,
            fire_damage: 15,
            starting_spells: 3,
            starting_units: 3,
            deck_copies: 2,
            // Teleport is left out of the default decks; it needs a
            // selected unit to be useful.
            spell_pool: vec![
                SpellKind::Fireball,
                SpellKind::Freeze,
                SpellKind::StrengthUp,
                SpellKind::MeteoriteStrike,
                SpellKind::ActionBlock,
            ],
            unit_pool: UnitKind::DEPLOYABLE.to_vec(),
            spells: SpellTuning::default(),
        }
    }
}

impl RulesConfig {
    /// Create the reference configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that a game can be set up under this configuration.
    ///
    /// The board needs a row for the commanders and two distinct
    /// deployment columns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 1 || self.cols < 2 {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// The board described by this configuration.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.rows, self.cols)
    }

    /// Set the board size.
    #[must_use]
    pub fn with_board(mut self, rows: i32, cols: i32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set the hand capacity.
    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: usize) -> Self {
        self.hand_capacity = capacity;
        self
    }

    /// Set the per-turn action points.
    #[must_use]
    pub fn with_action_points(mut self, action_points: u32) -> Self {
        self.action_points = action_points;
        self
    }

    /// Set the opening hand composition.
    #[must_use]
    pub fn with_starting_hand(mut self, spells: usize, units: usize) -> Self {
        self.starting_spells = spells;
        self.starting_units = units;
        self
    }

    /// Set the spell pool used to build decks.
    #[must_use]
    pub fn with_spell_pool(mut self, pool: Vec<SpellKind>) -> Self {
        self.spell_pool = pool;
        self
    }

    /// Set the number of copies of each pool entry per deck.
    #[must_use]
    pub fn with_deck_copies(mut self, copies: usize) -> Self {
        self.deck_copies = copies;
        self
    }

    /// Set the spell tuning.
    #[must_use]
    pub fn with_spell_tuning(mut self, spells: SpellTuning) -> Self {
        self.spells = spells;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = RulesConfig::default();

        assert_eq!(config.grid(), Grid::new(7, 10));
        assert_eq!(config.hand_capacity, 10);
        assert_eq!(config.action_points, 7);
        assert_eq!(config.blocked_action_points, 4);
        assert_eq!(config.burn_damage, 10);
        assert_eq!(config.fire_damage, 15);
        assert!(!config.spell_pool.contains(&SpellKind::Teleport));
        assert!(!config.unit_pool.contains(&UnitKind::Commander));
    }

    #[test]
    fn test_builder_setters() {
        let config = RulesConfig::new()
            .with_board(4, 5)
            .with_hand_capacity(6)
            .with_starting_hand(1, 2)
            .with_deck_copies(1)
            .with_spell_pool(vec![SpellKind::Teleport]);

        assert_eq!(config.rows, 4);
        assert_eq!(config.cols, 5);
        assert_eq!(config.hand_capacity, 6);
        assert_eq!(config.starting_spells, 1);
        assert_eq!(config.starting_units, 2);
        assert_eq!(config.deck_copies, 1);
        assert_eq!(config.spell_pool, vec![SpellKind::Teleport]);
    }

    #[test]
    fn test_validate_board_size() {
        assert_eq!(RulesConfig::default().validate(), Ok(()));
        assert_eq!(RulesConfig::default().with_board(1, 2).validate(), Ok(()));
        assert_eq!(
            RulesConfig::default().with_board(0, 5).validate(),
            Err(ConfigError::BoardTooSmall { rows: 0, cols: 5 })
        );
        assert_eq!(
            RulesConfig::default().with_board(7, 1).validate(),
            Err(ConfigError::BoardTooSmall { rows: 7, cols: 1 })
        );
        assert!(RulesConfig::default().with_board(-3, 10).validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = RulesConfig::default().with_board(5, 8);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
