//! Battlefield units.
//!
//! A `Unit` is created from an archetype's base stats and then mutated by
//! combat, spells and status effects. Units are identified by a stable
//! `UnitId` that is never reused within a game, so references held across
//! removals (attack records, selections) can't alias a newer unit.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::archetype::UnitKind;
use crate::core::{Cell, PlayerId};

/// Stable unit identifier, unique within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// A unit on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub owner: PlayerId,
    pub cell: Cell,

    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub move_range: u32,
    pub attack_range: u32,
    pub deploy_cost: u32,

    /// Turns left frozen; a frozen unit can neither move nor attack.
    pub frozen_turns: u32,
    /// Turns of burn damage left.
    pub burn_turns: u32,

    /// Set after any successful attack this turn; gates the Trebuchet.
    pub has_attacked: bool,
    /// Units attacked (or healed) by this unit this turn.
    pub attacked_targets: SmallVec<[UnitId; 4]>,
}

impl Unit {
    /// Create a unit with its archetype's base stats.
    #[must_use]
    pub fn new(id: UnitId, kind: UnitKind, owner: PlayerId, cell: Cell) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            owner,
            cell,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            move_range: stats.move_range,
            attack_range: stats.attack_range,
            deploy_cost: stats.deploy_cost,
            frozen_turns: 0,
            burn_turns: 0,
            has_attacked: false,
            attacked_targets: SmallVec::new(),
        }
    }

    /// Set current health, clamped to `max_health`.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    #[must_use]
    pub fn is_commander(&self) -> bool {
        self.kind == UnitKind::Commander
    }

    /// Reduce health, saturating at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Restore health, clamped to `max_health`. Returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    #[must_use]
    pub fn has_attacked_target(&self, target: UnitId) -> bool {
        self.attacked_targets.contains(&target)
    }

    /// Record a successful attack against `target`.
    pub fn record_attack(&mut self, target: UnitId) {
        self.has_attacked = true;
        if !self.has_attacked_target(target) {
            self.attacked_targets.push(target);
        }
    }

    /// Clear per-turn attack bookkeeping.
    pub fn reset_attacks(&mut self) {
        self.has_attacked = false;
        self.attacked_targets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> Unit {
        Unit::new(UnitId(7), UnitKind::Warrior, PlayerId::ONE, Cell::new(0, 0))
    }

    #[test]
    fn test_new_uses_base_stats() {
        let unit = warrior();
        assert_eq!(unit.health, 100);
        assert_eq!(unit.max_health, 100);
        assert_eq!(unit.attack, 40);
        assert!(unit.is_alive());
        assert!(!unit.is_frozen());
        assert!(!unit.is_commander());
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut unit = warrior().with_health(15);
        assert_eq!(unit.take_damage(40), 15);
        assert_eq!(unit.health, 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut unit = warrior().with_health(90);
        assert_eq!(unit.heal(30), 10);
        assert_eq!(unit.health, 100);
    }

    #[test]
    fn test_with_health_clamps() {
        assert_eq!(warrior().with_health(500).health, 100);
    }

    #[test]
    fn test_attack_records() {
        let mut unit = warrior();
        unit.record_attack(UnitId(3));
        unit.record_attack(UnitId(3));

        assert!(unit.has_attacked);
        assert!(unit.has_attacked_target(UnitId(3)));
        assert_eq!(unit.attacked_targets.len(), 1);

        unit.reset_attacks();
        assert!(!unit.has_attacked);
        assert!(!unit.has_attacked_target(UnitId(3)));
    }
}
