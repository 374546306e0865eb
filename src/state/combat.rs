//! Attacks and heals.

use log::trace;

use super::{AttackOutcome, GameState};
use crate::core::ActionError;
use crate::units::{Unit, UnitId, UnitKind};

/// A validated attack, ready to apply.
enum Strike {
    Heal(u32),
    Damage(u32),
}

impl GameState {
    /// Attack (or, for a Healer, heal) `target` with `attacker`.
    ///
    /// Attacks cost no action points. Each attacker may hit a given target
    /// once per turn, and a Trebuchet may fire only once per turn. A
    /// surviving damaged target is knocked one cell away from the attacker
    /// when the destination is free.
    pub fn attack_unit(&mut self, attacker: UnitId, target: UnitId) -> Result<AttackOutcome, ActionError> {
        let strike = self.plan_attack(attacker, target)?;

        let origin = self.unit(attacker).map(|u| u.cell).ok_or(ActionError::UnknownUnit(attacker))?;
        if let Some(unit) = self.unit_mut(attacker) {
            unit.record_attack(target);
        }

        let outcome = match strike {
            Strike::Heal(amount) => {
                let healed = self.unit_mut(target).map_or(0, |u| u.heal(amount));
                AttackOutcome::Healed { amount: healed }
            }
            Strike::Damage(amount) => {
                let dealt = self.damage_unit(target, amount);
                let survived = self.unit(target).is_some_and(Unit::is_alive);
                if survived {
                    let knocked_to = self.knock_back(target, origin);
                    AttackOutcome::Damaged { amount: dealt, knocked_to }
                } else {
                    self.purge_dead();
                    AttackOutcome::Killed { amount: dealt }
                }
            }
        };

        trace!("{} -> {}: {:?}", attacker, target, outcome);
        Ok(outcome)
    }

    fn plan_attack(&self, attacker_id: UnitId, target_id: UnitId) -> Result<Strike, ActionError> {
        self.ensure_in_progress()?;
        let attacker = self.own_unit(attacker_id)?;
        if attacker.is_frozen() {
            return Err(ActionError::Frozen);
        }
        let target = self.unit(target_id).ok_or(ActionError::UnknownUnit(target_id))?;
        if attacker_id == target_id {
            return Err(ActionError::InvalidTarget);
        }
        if attacker.kind == UnitKind::Trebuchet && attacker.has_attacked {
            return Err(ActionError::AlreadyFired);
        }
        if attacker.has_attacked_target(target_id) {
            return Err(ActionError::AlreadyAttacked);
        }

        let distance = attacker.cell.distance(target.cell);
        if distance > attacker.attack_range {
            return Err(ActionError::OutOfRange);
        }

        let friendly = attacker.owner == target.owner;
        match attacker.kind {
            UnitKind::Healer if friendly => Ok(Strike::Heal(attacker.attack)),
            UnitKind::Healer => Err(ActionError::InvalidTarget),
            _ if friendly => Err(ActionError::InvalidTarget),
            UnitKind::Trebuchet if distance <= 1 => Ok(Strike::Damage(attacker.attack / 2)),
            _ => Ok(Strike::Damage(attacker.attack)),
        }
    }

    /// Whether `attack_unit(attacker, target)` would succeed.
    #[must_use]
    pub fn can_attack(&self, attacker: UnitId, target: UnitId) -> bool {
        self.plan_attack(attacker, target).is_ok()
    }

    /// Units `attacker` can legally attack or heal right now.
    #[must_use]
    pub fn attackable_units(&self, attacker: UnitId) -> Vec<UnitId> {
        self.units
            .iter()
            .map(|u| u.id)
            .filter(|&target| self.can_attack(attacker, target))
            .collect()
    }
}
