//! Seeded construction of game states.
//!
//! `GameBuilder::new().build(seed)` produces the reference opening: both
//! commanders in the middle row of their deployment columns, shuffled decks
//! and opening hands dealt. Scenario setups can clear the board, place
//! extra units, light fires and pre-load hands.
//!
//! ```
//! use grids_tactics::core::{Cell, PlayerId};
//! use grids_tactics::state::GameBuilder;
//! use grids_tactics::units::UnitKind;
//!
//! let state = GameBuilder::new()
//!     .unit(UnitKind::Archer, PlayerId::ONE, Cell::new(0, 0))
//!     .build(42);
//! assert_eq!(state.unit_count(), 3);
//! ```

use std::sync::Arc;

use im::{OrdMap, Vector};

use super::GameState;
use crate::cards::{Deck, Hand, HandItem};
use crate::core::{Cell, ConfigError, GameRng, PlayerId, PlayerMap, RulesConfig};
use crate::units::{Unit, UnitId, UnitKind};

type UnitTweak = Box<dyn FnOnce(&mut Unit)>;

struct Placement {
    kind: UnitKind,
    owner: PlayerId,
    cell: Cell,
    tweak: Option<UnitTweak>,
}

/// Builder for a `GameState`.
pub struct GameBuilder {
    config: RulesConfig,
    commanders: bool,
    placements: Vec<Placement>,
    fires: Vec<(Cell, u32)>,
    blocked: PlayerMap<u32>,
    hands: PlayerMap<Option<Vec<HandItem>>>,
    first_player: PlayerId,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: RulesConfig::default(),
            commanders: true,
            placements: Vec::new(),
            fires: Vec::new(),
            blocked: PlayerMap::with_value(0),
            hands: PlayerMap::with_default(),
            first_player: PlayerId::ONE,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom rules configuration.
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Start without the two commanders.
    pub fn empty_board(mut self) -> Self {
        self.commanders = false;
        self
    }

    /// Place an extra unit with base stats.
    pub fn unit(mut self, kind: UnitKind, owner: PlayerId, cell: Cell) -> Self {
        self.placements.push(Placement { kind, owner, cell, tweak: None });
        self
    }

    /// Place an extra unit and adjust it before the game starts.
    pub fn unit_with(
        mut self,
        kind: UnitKind,
        owner: PlayerId,
        cell: Cell,
        tweak: impl FnOnce(&mut Unit) + 'static,
    ) -> Self {
        self.placements.push(Placement {
            kind,
            owner,
            cell,
            tweak: Some(Box::new(tweak)),
        });
        self
    }

    /// Light a fire tile.
    pub fn fire(mut self, cell: Cell, turns: u32) -> Self {
        self.fires.push((cell, turns));
        self
    }

    /// Start a player under Action Block.
    pub fn blocked(mut self, player: PlayerId, turns: u32) -> Self {
        self.blocked[player] = turns;
        self
    }

    /// Replace a player's opening hand. Decks are still built in full.
    pub fn hand(mut self, player: PlayerId, items: Vec<HandItem>) -> Self {
        self.hands[player] = Some(items);
        self
    }

    /// Choose who acts first.
    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Build the game, refusing a rules configuration with an unusable board.
    ///
    /// Scenario placements are still checked by assertion, as in `build`.
    pub fn try_build(self, seed: u64) -> Result<GameState, ConfigError> {
        self.config.validate()?;
        Ok(self.build(seed))
    }

    /// Build the game.
    ///
    /// # Panics
    ///
    /// If the configuration fails `RulesConfig::validate`, a placement or
    /// fire is off the board, two units share a cell, or a preset hand
    /// exceeds the hand capacity.
    pub fn build(self, seed: u64) -> GameState {
        if let Err(err) = self.config.validate() {
            panic!("invalid rules configuration: {err}");
        }
        let config = self.config;
        let grid = config.grid();
        let mut rng = GameRng::new(seed);

        // The opening turn counts against an Action Block like any other.
        let mut blocked = self.blocked;
        let action_points = if blocked[self.first_player] > 0 {
            blocked[self.first_player] -= 1;
            config.blocked_action_points
        } else {
            config.action_points
        };

        let mut spell_decks = PlayerMap::with_default();
        let mut unit_decks = PlayerMap::with_default();
        for player in PlayerId::both() {
            spell_decks[player] = Deck::from_pool(&config.spell_pool, config.deck_copies, &mut rng);
            unit_decks[player] = Deck::from_pool(&config.unit_pool, config.deck_copies, &mut rng);
        }

        let mut hands = PlayerMap::new(|_| Hand::new(config.hand_capacity));
        let mut preset = self.hands;
        for player in PlayerId::both() {
            let hand = &mut hands[player];
            if let Some(items) = preset[player].take() {
                for item in items {
                    assert!(hand.push(item).is_ok(), "preset hand for {player} exceeds capacity");
                }
                continue;
            }
            for _ in 0..config.starting_spells {
                let Some(spell) = spell_decks[player].draw() else { break };
                if hand.push(HandItem::Spell(spell)).is_err() {
                    spell_decks[player].put_back(spell);
                    break;
                }
            }
            for _ in 0..config.starting_units {
                let Some(kind) = unit_decks[player].draw() else { break };
                if hand.push(HandItem::Unit(kind)).is_err() {
                    unit_decks[player].put_back(kind);
                    break;
                }
            }
        }

        let mut placements = Vec::new();
        if self.commanders {
            let row = grid.rows() / 2;
            for player in PlayerId::both() {
                let cell = Cell::new(row, grid.deployment_column(player));
                placements.push(Placement {
                    kind: UnitKind::Commander,
                    owner: player,
                    cell,
                    tweak: None,
                });
            }
        }
        placements.extend(self.placements);

        let mut units = Vector::new();
        let mut next_unit_id = 0;
        for placement in placements {
            assert!(grid.contains(placement.cell), "unit placed off the board at {}", placement.cell);
            assert!(
                units.iter().all(|u: &Unit| u.cell != placement.cell),
                "two units placed at {}",
                placement.cell
            );
            let mut unit = Unit::new(UnitId(next_unit_id), placement.kind, placement.owner, placement.cell);
            next_unit_id += 1;
            if let Some(tweak) = placement.tweak {
                tweak(&mut unit);
                unit.health = unit.health.min(unit.max_health);
            }
            units.push_back(unit);
        }

        let mut fires = OrdMap::new();
        for (cell, turns) in self.fires {
            assert!(grid.contains(cell), "fire placed off the board at {cell}");
            if turns > 0 {
                fires.insert(cell, turns);
            }
        }

        GameState {
            config: Arc::new(config),
            grid,
            units,
            next_unit_id,
            hands,
            spell_decks,
            unit_decks,
            current_player: self.first_player,
            action_points,
            blocked_turns: blocked,
            fires,
            result: None,
            turn_number: 1,
            rng,
        }
    }
}
