//! Built-in agents and the self-play loop.
//!
//! Agents see the full `GameState` plus the legal action list and return
//! one of those actions. Learning agents live outside the crate and drive
//! `GridsEnv` directly (or through the Python bindings).

mod random;
mod self_play;

pub use random::RandomAgent;
pub use self_play::{play_episodes, run_episode, EpisodeStats, EpisodeSummary, SelfPlayConfig};

use crate::env::GameAction;
use crate::state::GameState;

/// Something that picks actions.
pub trait Agent {
    /// Choose one of `legal`. `legal` is never empty.
    fn select_action(&mut self, state: &GameState, legal: &[GameAction]) -> GameAction;

    /// Name for logs and summaries.
    fn name(&self) -> &str {
        "agent"
    }
}
