//! Spell planning and application.

use log::trace;

use super::Target;
use crate::cards::SpellKind;
use crate::core::{ActionError, Cell, PlayerId, DIRECTIONS};
use crate::state::GameState;
use crate::units::UnitId;

/// A validated spell, ready to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Fireball { cell: Cell, unit: Option<UnitId> },
    Freeze { unit: Option<UnitId> },
    StrengthUp { unit: Option<UnitId> },
    Meteorite { cell: Cell },
    ActionBlock { player: Option<PlayerId> },
    /// `unit: None` picks a random friendly unit when applied.
    Teleport { unit: Option<UnitId>, destination: Cell },
}

/// Validate a spell against the current state.
///
/// Card ownership and action points are checked by the caller.
pub(crate) fn plan(
    state: &GameState,
    spell: SpellKind,
    target: Target,
    selection: Option<UnitId>,
) -> Result<Resolution, ActionError> {
    let (cell, unit) = match target {
        Target::Unit(id) => {
            let unit = state.unit(id).ok_or(ActionError::UnknownUnit(id))?;
            (unit.cell, Some(unit))
        }
        Target::Cell(cell) => {
            if !state.grid().contains(cell) {
                return Err(ActionError::OutOfBounds(cell));
            }
            (cell, None)
        }
    };
    let unit_id = unit.map(|u| u.id);

    let resolution = match spell {
        SpellKind::Fireball => Resolution::Fireball { cell, unit: unit_id },
        SpellKind::Freeze => Resolution::Freeze { unit: unit_id },
        SpellKind::StrengthUp => Resolution::StrengthUp { unit: unit_id },
        SpellKind::MeteoriteStrike => Resolution::Meteorite { cell },
        SpellKind::ActionBlock => Resolution::ActionBlock {
            player: unit.map(|u| u.owner),
        },
        SpellKind::Teleport => plan_teleport(state, cell, selection)?,
    };
    Ok(resolution)
}

fn plan_teleport(state: &GameState, destination: Cell, selection: Option<UnitId>) -> Result<Resolution, ActionError> {
    if state.is_occupied(destination) {
        return Err(ActionError::Occupied(destination));
    }
    let player = state.current_player();
    match selection {
        Some(id) => {
            let unit = state.unit(id).ok_or(ActionError::UnknownUnit(id))?;
            if unit.owner != player {
                return Err(ActionError::NotYourUnit);
            }
        }
        None => {
            if state.units_of(player).is_empty() {
                return Err(ActionError::NoFriendlyUnit);
            }
        }
    }
    Ok(Resolution::Teleport { unit: selection, destination })
}

/// Carry out a planned spell.
///
/// The caller purges dead units afterwards.
pub(crate) fn apply(state: &mut GameState, resolution: Resolution) {
    let tuning = state.config().spells.clone();

    match resolution {
        Resolution::Fireball { cell, unit } => {
            if let Some(id) = unit {
                let dealt = state.damage_unit(id, tuning.fireball_damage);
                if let Some(target) = state.unit_mut(id) {
                    target.burn_turns = tuning.fireball_burn_turns;
                }
                trace!("fireball hit {} for {}", id, dealt);
            }
            state.ignite(cell, tuning.fire_tile_turns);
        }
        Resolution::Freeze { unit } => {
            if let Some(target) = unit.and_then(|id| state.unit_mut(id)) {
                target.frozen_turns = tuning.freeze_turns;
            }
        }
        Resolution::StrengthUp { unit } => {
            if let Some(target) = unit.and_then(|id| state.unit_mut(id)) {
                target.attack += tuning.strength_bonus;
            }
        }
        Resolution::Meteorite { cell } => {
            if let Some(id) = state.unit_at(cell).map(|u| u.id) {
                let dealt = state.damage_unit(id, tuning.meteorite_damage);
                trace!("meteorite hit {} for {}", id, dealt);
            }
            for (d_row, d_col) in DIRECTIONS {
                let neighbor = cell.offset(d_row, d_col);
                if let Some(id) = state.unit_at(neighbor).map(|u| u.id) {
                    state.knock_back(id, cell);
                }
            }
        }
        Resolution::ActionBlock { player } => {
            if let Some(player) = player {
                state.block_player(player, tuning.action_block_turns);
            }
        }
        Resolution::Teleport { unit, destination } => {
            let unit = unit.or_else(|| {
                let friendly = state.units_of(state.current_player());
                state.rng_mut().choose(&friendly).copied()
            });
            if let Some(id) = unit {
                state.relocate(id, destination);
                trace!("{} teleported to {}", id, destination);
            }
        }
    }
}
