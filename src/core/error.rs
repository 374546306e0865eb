//! Refusal reasons for game actions, and rejected configurations.
//!
//! Every mutating `GameState` operation returns `Result<_, ActionError>`.
//! An `Err` always means the state was left untouched, so callers (UI or
//! agent) can simply try something else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::Cell;
use crate::units::UnitId;

/// Why an action was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("the game is already decided")]
    GameOver,

    #[error("not enough action points: need {needed}, have {available}")]
    InsufficientActionPoints { needed: u32, available: u32 },

    #[error("no living unit {0}")]
    UnknownUnit(UnitId),

    #[error("unit does not belong to the current player")]
    NotYourUnit,

    #[error("unit is frozen")]
    Frozen,

    #[error("cell {0} is off the board")]
    OutOfBounds(Cell),

    #[error("cell {0} is occupied")]
    Occupied(Cell),

    #[error("no path of at most {range} steps to {goal}")]
    Unreachable { goal: Cell, range: u32 },

    #[error("target is out of range")]
    OutOfRange,

    #[error("invalid target")]
    InvalidTarget,

    #[error("target was already attacked by this unit this turn")]
    AlreadyAttacked,

    #[error("unit has already fired this turn")]
    AlreadyFired,

    #[error("cell {0} is not on the deployment column")]
    NotDeploymentColumn(Cell),

    #[error("item is not in hand")]
    NotInHand,

    #[error("deck is empty")]
    DeckEmpty,

    #[error("hand is full")]
    HandFull,

    #[error("no friendly unit to teleport")]
    NoFriendlyUnit,
}

/// Why a `RulesConfig` cannot be used to start a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least 1 row and 2 columns, got {rows}x{cols}")]
    BoardTooSmall { rows: i32, cols: i32 },
}
