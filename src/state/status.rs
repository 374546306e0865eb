//! End-of-turn status effects: freeze, burn and fire tiles.

use log::trace;

use super::GameState;

impl GameState {
    /// Tick every status effect once.
    ///
    /// For each living unit: frozen_turns counts down; a burning unit takes
    /// burn damage and its counter drops; a unit on a fire tile takes fire
    /// damage on top of any burn. Fire tiles then count down and expire.
    /// Dead units are purged afterwards.
    pub(super) fn resolve_status_effects(&mut self) {
        let burn_damage = self.config.burn_damage;
        let fire_damage = self.config.fire_damage;
        let fires = self.fires.clone();

        for unit in self.units.iter_mut() {
            if unit.frozen_turns > 0 {
                unit.frozen_turns -= 1;
            }
            if unit.burn_turns > 0 {
                let taken = unit.take_damage(burn_damage);
                unit.burn_turns -= 1;
                trace!("{} burns for {}", unit.id, taken);
            }
            if fires.contains_key(&unit.cell) {
                let taken = unit.take_damage(fire_damage);
                trace!("{} scorched for {} at {}", unit.id, taken, unit.cell);
            }
        }

        self.fires = fires
            .into_iter()
            .filter_map(|(cell, turns)| (turns > 1).then_some((cell, turns - 1)))
            .collect();

        self.purge_dead();
    }
}
