//! Core engine types: geometry, players, RNG, configuration, errors.
//!
//! These are the leaf building blocks every other module depends on.

pub mod grid;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use grid::{manhattan_distance, Cell, Grid, DIRECTIONS};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{RulesConfig, SpellTuning};
pub use error::{ActionError, ConfigError};
