//! Action/observation adapter for agents.
//!
//! The rules engine speaks in unit ids and hand items; agents speak in
//! index tuples and flat integers. This module translates between them:
//!
//! - `GameAction` / `ActionSpace`: the `(kind, index, row, col)` contract and
//!   its flat encoding
//! - `legal_actions`: everything the acting player may do right now
//! - `Observation`: the acting player's view of the board and hand
//! - `GridsEnv`: `reset`/`step` episodes with shaped rewards
//!
//! Refused actions cost a small penalty and leave the game unchanged.
//! Actions whose index names nothing abort the episode.

mod action;
mod grids_env;
mod legal;
mod observation;
mod reward;

pub use action::{ActionKind, ActionSpace, Command, EnvError, GameAction};
pub use grids_env::{EnvConfig, GridsEnv, StepInfo, StepResult};
pub use legal::legal_actions;
pub use observation::Observation;
pub use reward::RewardConfig;
