//! Legal action enumeration.

use std::collections::BTreeSet;

use super::GameAction;
use crate::core::{Cell, DIRECTIONS};
use crate::effects::Target;
use crate::state::{DeckKind, GameState};

/// Every action the acting player can legally take.
///
/// Spell targets are limited to the cells holding a unit and their four
/// neighbours. EndTurn is always included while the game runs; a decided
/// game has no legal actions.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<GameAction> {
    if state.is_over() {
        return Vec::new();
    }
    let player = state.current_player();
    let mut actions = Vec::new();

    for (index, unit) in state.units().enumerate() {
        if unit.owner != player {
            continue;
        }
        for cell in state.valid_move_squares(unit.id) {
            if state.can_move(unit.id, cell) {
                actions.push(GameAction::move_unit(index, cell));
            }
        }
        for target in state.attackable_units(unit.id) {
            if let Some(target) = state.unit(target) {
                actions.push(GameAction::attack(index, target.cell));
            }
        }
    }

    let hand = state.hand(player);
    for (index, kind) in hand.units().enumerate() {
        for cell in state.valid_deploy_squares(player) {
            if state.can_deploy(kind, cell) {
                actions.push(GameAction::deploy(index, cell));
            }
        }
    }

    let targets = spell_target_cells(state);
    for (index, spell) in hand.spells().enumerate() {
        for &cell in &targets {
            if state.can_play_card(spell, Target::at(state, cell), None) {
                actions.push(GameAction::play_card(index, cell));
            }
        }
    }

    if state.can_draw(DeckKind::Spell) {
        actions.push(GameAction::draw_spell());
    }
    if state.can_draw(DeckKind::Unit) {
        actions.push(GameAction::draw_unit());
    }
    actions.push(GameAction::end_turn());
    actions
}

/// Unit cells and their in-bounds orthogonal neighbours, row-major.
fn spell_target_cells(state: &GameState) -> BTreeSet<Cell> {
    let grid = state.grid();
    let mut cells = BTreeSet::new();
    for unit in state.units() {
        cells.insert(unit.cell);
        for (d_row, d_col) in DIRECTIONS {
            let cell = unit.cell.offset(d_row, d_col);
            if grid.contains(cell) {
                cells.insert(cell);
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::env::ActionKind;
    use crate::state::GameBuilder;
    use crate::units::UnitKind;

    #[test]
    fn test_opening_actions() {
        let state = GameState::new(42);
        let actions = legal_actions(&state);

        assert_eq!(actions.last(), Some(&GameAction::end_turn()));
        assert!(actions.contains(&GameAction::draw_spell()));
        assert!(actions.contains(&GameAction::draw_unit()));
        assert!(actions.iter().any(|a| a.kind == ActionKind::Move));
        assert!(actions.iter().any(|a| a.kind == ActionKind::Deploy));
        // The commanders start nine columns apart.
        assert!(actions.iter().all(|a| a.kind != ActionKind::Attack));
    }

    #[test]
    fn test_every_listed_action_applies() {
        let state = GameState::new(7);
        for action in legal_actions(&state) {
            let mut copy = state.clone();
            let command = action.resolve(&copy).unwrap();
            assert!(command.execute(&mut copy).is_ok(), "{action:?} was refused");
        }
    }

    #[test]
    fn test_no_actions_after_game_over() {
        let mut state = GameBuilder::new()
            .unit(UnitKind::Viking, PlayerId::ONE, Cell::new(3, 8))
            .build(1);
        let viking = state.unit_at(Cell::new(3, 8)).unwrap().id;
        let commander = state.unit_at(Cell::new(3, 9)).unwrap().id;
        for _ in 0..3 {
            state.attack_unit(viking, commander).ok();
            state.end_turn().ok();
            state.end_turn().ok();
        }
        assert!(state.is_over());
        assert!(legal_actions(&state).is_empty());
    }
}
