//! Uniform random play.

use super::Agent;
use crate::core::GameRng;
use crate::env::GameAction;
use crate::state::GameState;

/// Picks uniformly among the legal actions with its own seeded RNG.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, _state: &GameState, legal: &[GameAction]) -> GameAction {
        self.rng.choose(legal).copied().unwrap_or_else(GameAction::end_turn)
    }

    fn name(&self) -> &str {
        "random"
    }
}
