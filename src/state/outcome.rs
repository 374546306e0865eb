//! Game results and per-action outcomes.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, PlayerId};

/// Result of a decided game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Exactly one commander survives.
    Winner(PlayerId),
    /// Both commanders fell in the same resolution step.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning player, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// What a successful attack did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// A Healer restored health to a friendly unit.
    Healed { amount: u32 },
    /// The target survived; `knocked_to` is its new cell if it was pushed.
    Damaged { amount: u32, knocked_to: Option<Cell> },
    /// The target died and was removed.
    Killed { amount: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::TWO);
        assert!(!result.is_winner(PlayerId::ONE));
        assert!(result.is_winner(PlayerId::TWO));
        assert_eq!(result.winner(), Some(PlayerId::TWO));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::ONE));
        assert_eq!(draw.winner(), None);
    }
}
