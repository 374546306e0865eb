//! Reward shaping for the step adapter.

use serde::{Deserialize, Serialize};

use super::ActionKind;

/// Per-step rewards, from the acting player's point of view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub move_unit: f32,
    pub deploy: f32,
    pub attack: f32,
    pub draw: f32,
    pub play_card: f32,
    pub end_turn: f32,
    /// A well-formed action the rules refused.
    pub refused: f32,
    /// An index that names nothing; also ends the episode.
    pub invalid: f32,
    pub win: f32,
    pub loss: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            move_unit: 0.1,
            deploy: 0.5,
            attack: 0.5,
            draw: 0.1,
            play_card: 0.5,
            end_turn: 0.0,
            refused: -0.1,
            invalid: -1.0,
            win: 10.0,
            loss: -10.0,
        }
    }
}

impl RewardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewards that only score the outcome.
    #[must_use]
    pub fn sparse() -> Self {
        Self {
            move_unit: 0.0,
            deploy: 0.0,
            attack: 0.0,
            draw: 0.0,
            play_card: 0.0,
            end_turn: 0.0,
            refused: 0.0,
            invalid: -1.0,
            win: 1.0,
            loss: -1.0,
        }
    }

    pub fn with_win_loss(mut self, win: f32, loss: f32) -> Self {
        self.win = win;
        self.loss = loss;
        self
    }

    pub fn with_refused(mut self, penalty: f32) -> Self {
        self.refused = penalty;
        self
    }

    /// Reward for a successful action of `kind`.
    #[must_use]
    pub fn for_success(&self, kind: ActionKind) -> f32 {
        match kind {
            ActionKind::Move => self.move_unit,
            ActionKind::Deploy => self.deploy,
            ActionKind::PlayCard => self.play_card,
            ActionKind::EndTurn => self.end_turn,
            ActionKind::Attack => self.attack,
            ActionKind::DrawSpell | ActionKind::DrawUnit => self.draw,
        }
    }
}
