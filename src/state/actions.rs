//! Turn actions: move, deploy, draw, play card, end turn.
//!
//! Attacks live in `combat`. Every operation validates completely before
//! touching the state, so an `Err` is always a no-op.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::GameState;
use crate::cards::{HandItem, SpellKind};
use crate::core::{ActionError, Cell, PlayerId};
use crate::effects::{self, Target};
use crate::pathfinding::{find_path, reachable_cells, Path};
use crate::units::{Unit, UnitId, UnitKind};

/// Which deck a draw comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Spell,
    Unit,
}

/// Cost of moving a unit, independent of distance.
const MOVE_COST: u32 = 1;

impl GameState {
    // === Move ===

    /// Move one of the current player's units to `goal`.
    ///
    /// Costs 1 AP. The goal must be reachable in at most `move_range`
    /// orthogonal steps without passing through other units. Returns the
    /// path walked (start exclusive, goal inclusive).
    pub fn move_unit(&mut self, id: UnitId, goal: Cell) -> Result<Path, ActionError> {
        let path = self.plan_move(id, goal)?;

        self.action_points -= MOVE_COST;
        self.relocate(id, goal);
        trace!("{} moved to {} in {} steps", id, goal, path.len());
        Ok(path)
    }

    fn plan_move(&self, id: UnitId, goal: Cell) -> Result<Path, ActionError> {
        self.ensure_in_progress()?;
        let unit = self.own_unit(id)?;
        if unit.is_frozen() {
            return Err(ActionError::Frozen);
        }
        if !self.grid.contains(goal) {
            return Err(ActionError::OutOfBounds(goal));
        }
        if self.is_occupied(goal) {
            return Err(ActionError::Occupied(goal));
        }
        self.ensure_action_points(MOVE_COST)?;

        let path = find_path(&self.grid, unit.cell, goal, &self.occupied_cells());
        if path.is_empty() || path.len() as u32 > unit.move_range {
            return Err(ActionError::Unreachable {
                goal,
                range: unit.move_range,
            });
        }
        Ok(path)
    }

    /// Cells a unit could reach with its move range, ignoring AP and
    /// freeze. Empty for unknown units.
    #[must_use]
    pub fn valid_move_squares(&self, id: UnitId) -> Vec<Cell> {
        match self.unit(id) {
            Some(unit) => reachable_cells(&self.grid, unit.cell, unit.move_range, &self.occupied_cells()),
            None => Vec::new(),
        }
    }

    /// Whether `move_unit(id, goal)` would succeed.
    #[must_use]
    pub fn can_move(&self, id: UnitId, goal: Cell) -> bool {
        self.plan_move(id, goal).is_ok()
    }

    // === Deploy ===

    /// Deploy a unit token from the current player's hand onto their
    /// deployment column. Costs the archetype's deploy cost.
    pub fn deploy_unit(&mut self, kind: UnitKind, cell: Cell) -> Result<UnitId, ActionError> {
        self.check_deploy(kind, cell)?;

        let player = self.current_player;
        self.hands[player].remove(HandItem::Unit(kind));
        self.action_points -= kind.stats().deploy_cost;

        let id = self.alloc_unit_id();
        self.units.push_back(Unit::new(id, kind, player, cell));
        debug!("{} deployed {} as {} at {}", player, kind, id, cell);
        Ok(id)
    }

    fn check_deploy(&self, kind: UnitKind, cell: Cell) -> Result<(), ActionError> {
        self.ensure_in_progress()?;
        let player = self.current_player;
        if !self.hands[player].contains(HandItem::Unit(kind)) {
            return Err(ActionError::NotInHand);
        }
        if !self.grid.contains(cell) {
            return Err(ActionError::OutOfBounds(cell));
        }
        if cell.col != self.grid.deployment_column(player) {
            return Err(ActionError::NotDeploymentColumn(cell));
        }
        if self.is_occupied(cell) {
            return Err(ActionError::Occupied(cell));
        }
        self.ensure_action_points(kind.stats().deploy_cost)
    }

    /// Empty cells on a player's deployment column.
    #[must_use]
    pub fn valid_deploy_squares(&self, player: PlayerId) -> Vec<Cell> {
        let col = self.grid.deployment_column(player);
        (0..self.grid.rows())
            .map(|row| Cell::new(row, col))
            .filter(|cell| !self.is_occupied(*cell))
            .collect()
    }

    /// Whether `deploy_unit(kind, cell)` would succeed.
    #[must_use]
    pub fn can_deploy(&self, kind: UnitKind, cell: Cell) -> bool {
        self.check_deploy(kind, cell).is_ok()
    }

    // === Draw ===

    /// Draw the top card of one of the current player's decks into hand.
    pub fn draw_card(&mut self, deck: DeckKind) -> Result<HandItem, ActionError> {
        self.check_draw(deck)?;

        let player = self.current_player;
        let item = match deck {
            DeckKind::Spell => self.spell_decks[player].draw().map(HandItem::Spell),
            DeckKind::Unit => self.unit_decks[player].draw().map(HandItem::Unit),
        }
        .ok_or(ActionError::DeckEmpty)?;

        if self.hands[player].push(item).is_err() {
            // Unreachable after check_draw; put the card back rather than lose it.
            match item {
                HandItem::Spell(spell) => self.spell_decks[player].put_back(spell),
                HandItem::Unit(kind) => self.unit_decks[player].put_back(kind),
            }
            return Err(ActionError::HandFull);
        }
        self.action_points -= self.config.draw_cost;
        trace!("{} drew {:?}", player, item);
        Ok(item)
    }

    fn check_draw(&self, deck: DeckKind) -> Result<(), ActionError> {
        self.ensure_in_progress()?;
        self.ensure_action_points(self.config.draw_cost)?;
        if self.deck_size(self.current_player, deck) == 0 {
            return Err(ActionError::DeckEmpty);
        }
        if self.hands[self.current_player].is_full() {
            return Err(ActionError::HandFull);
        }
        Ok(())
    }

    /// Whether `draw_card(deck)` would succeed.
    #[must_use]
    pub fn can_draw(&self, deck: DeckKind) -> bool {
        self.check_draw(deck).is_ok()
    }

    // === Play card ===

    /// Play a spell card from the current player's hand.
    ///
    /// `selection` is only read by Teleport: the friendly unit to move. With
    /// no selection a random friendly unit is chosen from the game RNG.
    pub fn play_card(
        &mut self,
        spell: SpellKind,
        target: Target,
        selection: Option<UnitId>,
    ) -> Result<(), ActionError> {
        let resolution = self.plan_card(spell, target, selection)?;

        let player = self.current_player;
        self.hands[player].remove(HandItem::Spell(spell));
        self.action_points -= spell.cost();
        debug!("{} played {} on {:?}", player, spell.name(), target);

        effects::apply(self, resolution);
        self.purge_dead();
        Ok(())
    }

    fn plan_card(
        &self,
        spell: SpellKind,
        target: Target,
        selection: Option<UnitId>,
    ) -> Result<effects::Resolution, ActionError> {
        self.ensure_in_progress()?;
        if !self.hands[self.current_player].contains(HandItem::Spell(spell)) {
            return Err(ActionError::NotInHand);
        }
        self.ensure_action_points(spell.cost())?;
        effects::plan(self, spell, target, selection)
    }

    /// Whether `play_card(spell, target, selection)` would succeed.
    #[must_use]
    pub fn can_play_card(&self, spell: SpellKind, target: Target, selection: Option<UnitId>) -> bool {
        self.plan_card(spell, target, selection).is_ok()
    }

    // === End turn ===

    /// Finish the current player's turn.
    ///
    /// Resolves status effects, clears attack records, hands control to the
    /// opponent and refills their action points (reduced while blocked).
    pub fn end_turn(&mut self) -> Result<(), ActionError> {
        self.ensure_in_progress()?;

        self.resolve_status_effects();

        for unit in self.units.iter_mut() {
            unit.reset_attacks();
        }

        let next = self.current_player.opponent();
        self.current_player = next;
        self.action_points = if self.blocked_turns[next] > 0 {
            self.blocked_turns[next] -= 1;
            self.config.blocked_action_points
        } else {
            self.config.action_points
        };
        self.turn_number += 1;

        debug!(
            "turn {}: {} to act with {} AP",
            self.turn_number, next, self.action_points
        );
        Ok(())
    }
}
