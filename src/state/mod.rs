//! Game state: the single owner of everything that changes during a game.
//!
//! ## Ownership
//!
//! `GameState` owns every unit, hand, deck, timer and fire tile. Outside
//! code only ever gets shared references; all mutation goes through the
//! operations in this module:
//!
//! - `move_unit`, `attack_unit`, `deploy_unit`, `draw_card`, `play_card`
//! - `end_turn` (status effects, player switch, action point reset)
//!
//! Each operation either applies completely or returns an `ActionError`
//! and leaves the state untouched.
//!
//! ## Unit storage
//!
//! Units live in an `im::Vector` in deployment order, which is also the
//! index order the action adapter exposes. Dead units are compacted out by
//! `purge_dead` right after every damaging step, followed by a winner check.
//!
//! ## Cloning
//!
//! Persistent collections make `clone()` cheap, which lets agents roll out
//! hypothetical futures from a copy.

use std::sync::Arc;

use im::{OrdMap, Vector};
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::cards::{Deck, Hand, SpellKind};
use crate::core::{ActionError, Cell, GameRng, GameRngState, Grid, PlayerId, PlayerMap, RulesConfig};
use crate::units::{Unit, UnitId, UnitKind};

mod actions;
mod builder;
mod combat;
mod outcome;
mod status;

pub use actions::DeckKind;
pub use builder::GameBuilder;
pub use outcome::{AttackOutcome, GameResult};

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    config: Arc<RulesConfig>,
    grid: Grid,

    /// Living units in deployment order.
    units: Vector<Unit>,
    next_unit_id: u32,

    hands: PlayerMap<Hand>,
    spell_decks: PlayerMap<Deck<SpellKind>>,
    unit_decks: PlayerMap<Deck<UnitKind>>,

    current_player: PlayerId,
    action_points: u32,
    /// Remaining reduced-AP turns per player (Action Block).
    blocked_turns: PlayerMap<u32>,
    /// Burning cells and their remaining turns.
    fires: OrdMap<Cell, u32>,

    result: Option<GameResult>,
    turn_number: u32,

    rng: GameRng,
}

impl GameState {
    /// Start a reference game with the default rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        GameBuilder::new().build(seed)
    }

    // === Configuration ===

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    // === Turn ===

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Action points left this turn.
    #[must_use]
    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    /// Turn number, starting at 1 and incremented by every `end_turn`.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Remaining Action Block turns for a player.
    #[must_use]
    pub fn blocked_turns(&self, player: PlayerId) -> u32 {
        self.blocked_turns[player]
    }

    // === Result ===

    /// The decided result, if the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// The winning player. `None` while the game runs and on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.and_then(|r| r.winner())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    // === Units ===

    /// Living units in index order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// The unit at a position in the live unit list.
    #[must_use]
    pub fn unit_at_index(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    /// Look up a living unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// The unit standing on a cell.
    #[must_use]
    pub fn unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.units.iter().find(|u| u.cell == cell)
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.unit_at(cell).is_some()
    }

    /// Every cell holding a unit.
    #[must_use]
    pub fn occupied_cells(&self) -> FxHashSet<Cell> {
        self.units.iter().map(|u| u.cell).collect()
    }

    /// Ids of a player's living units.
    #[must_use]
    pub fn units_of(&self, player: PlayerId) -> Vec<UnitId> {
        self.units.iter().filter(|u| u.owner == player).map(|u| u.id).collect()
    }

    // === Cards ===

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn deck_size(&self, player: PlayerId, deck: DeckKind) -> usize {
        match deck {
            DeckKind::Spell => self.spell_decks[player].len(),
            DeckKind::Unit => self.unit_decks[player].len(),
        }
    }

    // === Fire ===

    /// Remaining turns of the fire on a cell.
    #[must_use]
    pub fn fire_turns(&self, cell: Cell) -> Option<u32> {
        self.fires.get(&cell).copied()
    }

    /// Burning cells with their remaining turns, in row-major order.
    pub fn fires(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.fires.iter().map(|(cell, turns)| (*cell, *turns))
    }

    // === RNG ===

    /// Snapshot of the RNG position.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Internal helpers ===

    fn index_of(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|u| u.id == id)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        let index = self.index_of(id)?;
        self.units.get_mut(index)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    fn alloc_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    fn ensure_in_progress(&self) -> Result<(), ActionError> {
        if self.is_over() {
            return Err(ActionError::GameOver);
        }
        Ok(())
    }

    fn ensure_action_points(&self, needed: u32) -> Result<(), ActionError> {
        if self.action_points < needed {
            return Err(ActionError::InsufficientActionPoints {
                needed,
                available: self.action_points,
            });
        }
        Ok(())
    }

    /// Look up one of the current player's units.
    fn own_unit(&self, id: UnitId) -> Result<&Unit, ActionError> {
        let unit = self.unit(id).ok_or(ActionError::UnknownUnit(id))?;
        if unit.owner != self.current_player {
            return Err(ActionError::NotYourUnit);
        }
        Ok(unit)
    }

    /// Deal damage to a unit. Returns the damage taken.
    ///
    /// Dead units stay in place until the next `purge_dead`.
    pub(crate) fn damage_unit(&mut self, id: UnitId, amount: u32) -> u32 {
        self.unit_mut(id).map_or(0, |unit| unit.take_damage(amount))
    }

    /// Push a unit one cell away from `origin` if the destination is on the
    /// board and empty. Returns the new cell when the unit moved.
    pub(crate) fn knock_back(&mut self, id: UnitId, origin: Cell) -> Option<Cell> {
        let from = self.unit(id)?.cell;
        let to = from.away_from(origin);
        if to == from || !self.grid.contains(to) || self.is_occupied(to) {
            return None;
        }
        self.relocate(id, to);
        Some(to)
    }

    pub(crate) fn relocate(&mut self, id: UnitId, cell: Cell) {
        if let Some(unit) = self.unit_mut(id) {
            unit.cell = cell;
        }
    }

    /// Set a cell on fire, refreshing any existing fire there.
    pub(crate) fn ignite(&mut self, cell: Cell, turns: u32) {
        if turns > 0 {
            self.fires.insert(cell, turns);
        }
    }

    pub(crate) fn block_player(&mut self, player: PlayerId, turns: u32) {
        self.blocked_turns[player] = turns;
    }

    /// Remove dead units and re-check the win condition if any died.
    ///
    /// Returns the number of units removed.
    pub(crate) fn purge_dead(&mut self) -> usize {
        let before = self.units.len();
        for unit in self.units.iter().filter(|u| !u.is_alive()) {
            debug!("{} {} of {} died at {}", unit.kind, unit.id, unit.owner, unit.cell);
        }
        self.units.retain(|u| u.is_alive());
        let removed = before - self.units.len();
        if removed > 0 {
            self.update_result();
        }
        removed
    }

    fn update_result(&mut self) {
        let commander_alive =
            |player: PlayerId| self.units.iter().any(|u| u.is_commander() && u.owner == player);

        self.result = match (commander_alive(PlayerId::ONE), commander_alive(PlayerId::TWO)) {
            (true, true) => None,
            (true, false) => Some(GameResult::Winner(PlayerId::ONE)),
            (false, true) => Some(GameResult::Winner(PlayerId::TWO)),
            (false, false) => Some(GameResult::Draw),
        };

        if let Some(result) = self.result {
            info!("game decided on turn {}: {:?}", self.turn_number, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new(42);

        assert_eq!(state.current_player(), PlayerId::ONE);
        assert_eq!(state.action_points(), 7);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.winner(), None);
        assert!(!state.is_over());

        assert_eq!(state.unit_count(), 2);
        let c1 = state.unit_at(Cell::new(3, 0)).unwrap();
        let c2 = state.unit_at(Cell::new(3, 9)).unwrap();
        assert!(c1.is_commander() && c1.owner == PlayerId::ONE);
        assert!(c2.is_commander() && c2.owner == PlayerId::TWO);

        for player in PlayerId::both() {
            assert_eq!(state.hand(player).spell_count(), 3);
            assert_eq!(state.hand(player).unit_count(), 3);
            assert_eq!(state.deck_size(player, DeckKind::Spell), 7);
            assert_eq!(state.deck_size(player, DeckKind::Unit), 7);
            assert_eq!(state.blocked_turns(player), 0);
        }
    }

    #[test]
    fn test_same_seed_same_hands() {
        let a = GameState::new(7);
        let b = GameState::new(7);
        for player in PlayerId::both() {
            assert_eq!(a.hand(player), b.hand(player));
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let state = GameState::new(42);
        let mut copy = state.clone();
        copy.end_turn().unwrap();

        assert_eq!(state.current_player(), PlayerId::ONE);
        assert_eq!(copy.current_player(), PlayerId::TWO);
    }

    #[test]
    fn test_knock_back_blocked_by_edge() {
        let mut state = GameBuilder::new()
            .empty_board()
            .unit(UnitKind::Warrior, PlayerId::TWO, Cell::new(0, 5))
            .build(1);
        let id = state.unit_at(Cell::new(0, 5)).unwrap().id;

        assert_eq!(state.knock_back(id, Cell::new(1, 5)), None);
        assert_eq!(state.knock_back(id, Cell::new(0, 4)), Some(Cell::new(0, 6)));
    }

    #[test]
    fn test_purge_without_deaths_keeps_result() {
        let mut state = GameBuilder::new()
            .empty_board()
            .unit(UnitKind::Warrior, PlayerId::ONE, Cell::new(0, 0))
            .build(1);

        // No commanders on the board, but nothing died: still undecided.
        assert_eq!(state.purge_dead(), 0);
        assert!(!state.is_over());
    }
}
