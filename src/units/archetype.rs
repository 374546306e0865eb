//! Unit archetypes and their base stats.
//!
//! Archetypes are a closed set, so they are an enum with a stat table
//! rather than a trait hierarchy. Behavioural quirks (the Healer heals,
//! the Trebuchet fires once per turn) are branches on the tag in the
//! combat code.

use serde::{Deserialize, Serialize};

/// Base stats shared by every unit of an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitStats {
    pub health: u32,
    pub attack: u32,
    /// BFS hop budget per move.
    pub move_range: u32,
    /// Manhattan distance budget per attack.
    pub attack_range: u32,
    /// Action points to deploy from hand.
    pub deploy_cost: u32,
}

/// Unit archetype tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    Commander,
    Warrior,
    Archer,
    Healer,
    Trebuchet,
    Viking,
}

impl UnitKind {
    /// Every archetype, in type-id order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Commander,
        UnitKind::Warrior,
        UnitKind::Archer,
        UnitKind::Healer,
        UnitKind::Trebuchet,
        UnitKind::Viking,
    ];

    /// Archetypes that can appear in unit decks.
    pub const DEPLOYABLE: [UnitKind; 5] = [
        UnitKind::Warrior,
        UnitKind::Archer,
        UnitKind::Healer,
        UnitKind::Trebuchet,
        UnitKind::Viking,
    ];

    /// Base stats for this archetype.
    #[must_use]
    pub const fn stats(self) -> UnitStats {
        let (health, attack, move_range, attack_range, deploy_cost) = match self {
            UnitKind::Commander => (150, 20, 2, 1, 1),
            UnitKind::Warrior => (100, 40, 2, 1, 2),
            UnitKind::Archer => (80, 20, 2, 4, 2),
            UnitKind::Healer => (80, 30, 3, 3, 2),
            UnitKind::Trebuchet => (70, 20, 1, 99, 3),
            UnitKind::Viking => (90, 60, 1, 1, 2),
        };
        UnitStats {
            health,
            attack,
            move_range,
            attack_range,
            deploy_cost,
        }
    }

    /// Stable numeric id used in observations (0 is reserved for "empty").
    #[must_use]
    pub const fn type_id(self) -> u8 {
        match self {
            UnitKind::Commander => 1,
            UnitKind::Warrior => 2,
            UnitKind::Archer => 3,
            UnitKind::Healer => 4,
            UnitKind::Trebuchet => 5,
            UnitKind::Viking => 6,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::Commander => "Commander",
            UnitKind::Warrior => "Warrior",
            UnitKind::Archer => "Archer",
            UnitKind::Healer => "Healer",
            UnitKind::Trebuchet => "Trebuchet",
            UnitKind::Viking => "Viking",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ids_are_unique_and_nonzero() {
        let mut ids: Vec<_> = UnitKind::ALL.iter().map(|k| k.type_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), UnitKind::ALL.len());
        assert!(!ids.contains(&0));
    }

    #[test]
    fn test_trebuchet_outranges_board() {
        let stats = UnitKind::Trebuchet.stats();
        assert_eq!(stats.attack_range, 99);
        assert_eq!(stats.move_range, 1);
        assert_eq!(stats.deploy_cost, 3);
    }

    #[test]
    fn test_commander_not_deployable() {
        assert!(!UnitKind::DEPLOYABLE.contains(&UnitKind::Commander));
        assert_eq!(UnitKind::Commander.stats().health, 150);
    }
}
