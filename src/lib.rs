//! # grids-tactics
//!
//! Headless rules engine for a two-player, turn-based tactics game on a
//! fixed grid, built for agents as much as for people.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `GameState` owns every unit, card and timer. All
//!    mutation goes through its operations, which either apply fully or
//!    refuse with an `ActionError` and change nothing.
//!
//! 2. **Deterministic**: every random choice (deck shuffles, the Teleport
//!    fallback, random agents) comes from a seeded `GameRng`.
//!
//! 3. **Cheap to clone**: units and fire tiles live in `im` persistent
//!    collections, so agents can roll out futures from copies.
//!
//! ## Modules
//!
//! - `core`: geometry, players, RNG, rules configuration, errors
//! - `units`: archetypes and live units
//! - `cards`: spells, hands, decks
//! - `pathfinding`: A* paths and BFS reachability
//! - `state`: the game state and its operations
//! - `effects`: spell targeting and resolution
//! - `env`: the `(kind, index, row, col)` action contract, observations,
//!   and a step-based environment
//! - `agents`: random agent and self-play episodes

pub mod core;
pub mod units;
pub mod cards;
pub mod pathfinding;
pub mod state;
pub mod effects;
pub mod env;
pub mod agents;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{ActionError, Cell, GameRng, Grid, PlayerId, PlayerMap, RulesConfig, SpellTuning};

pub use crate::units::{Unit, UnitId, UnitKind};

pub use crate::cards::{Deck, Hand, HandItem, SpellKind};

pub use crate::state::{AttackOutcome, DeckKind, GameBuilder, GameResult, GameState};

pub use crate::effects::Target;

pub use crate::env::{
    legal_actions, ActionKind, ActionSpace, EnvConfig, GameAction, GridsEnv, Observation, RewardConfig,
    StepResult,
};

pub use crate::agents::{run_episode, Agent, EpisodeSummary, RandomAgent, SelfPlayConfig};
