//! Agent-vs-agent episodes.

use log::info;
use serde::{Deserialize, Serialize};

use super::Agent;
use crate::core::{PlayerId, PlayerMap};
use crate::env::{EnvConfig, GridsEnv};
use crate::state::GameResult;

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Environment (rules, rewards, step limit) used for every episode.
    pub env: EnvConfig,

    /// Seed offset, combined with the episode index for unique seeds.
    pub seed_offset: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            env: EnvConfig::default(),
            seed_offset: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }

    /// Set the per-episode step limit.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.env.max_steps = Some(max_steps);
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }
}

/// How one episode went.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    /// `None` when the step limit cut the game short or an agent aborted it.
    pub result: Option<GameResult>,
    pub steps: u32,
    /// Rewards summed per acting player.
    pub rewards: PlayerMap<f32>,
    /// An agent sent an action that named nothing.
    pub aborted: bool,
}

impl EpisodeSummary {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.and_then(|r| r.winner())
    }
}

/// Play one episode from a fresh game seeded with `seed`.
///
/// `agents[p]` acts whenever it is player `p`'s turn.
pub fn run_episode(env: &mut GridsEnv, agents: &mut PlayerMap<Box<dyn Agent>>, seed: u64) -> EpisodeSummary {
    env.reset(seed);
    let mut rewards = PlayerMap::with_value(0.0);
    let mut aborted = false;

    loop {
        let legal = env.legal_actions();
        let player = env.state().current_player();
        let action = agents[player].select_action(env.state(), &legal);
        let step = env.step(&action);

        rewards[step.info.player] += step.reward;
        aborted |= step.info.invalid.is_some();
        if step.is_done() {
            break;
        }
    }

    let summary = EpisodeSummary {
        seed,
        result: env.state().result(),
        steps: env.steps(),
        rewards,
        aborted,
    };
    info!(
        "episode {} finished after {} steps: {:?}",
        seed, summary.steps, summary.result
    );
    summary
}

/// Play `count` episodes with fresh agents from `make_agents`.
pub fn play_episodes(
    config: &SelfPlayConfig,
    mut make_agents: impl FnMut(u64) -> PlayerMap<Box<dyn Agent>>,
    count: usize,
) -> Vec<EpisodeSummary> {
    let mut env = GridsEnv::with_config(config.env.clone(), config.seed_offset);
    (0..count as u64)
        .map(|i| {
            let seed = config.seed_offset + i;
            let mut agents = make_agents(seed);
            run_episode(&mut env, &mut agents, seed)
        })
        .collect()
}

/// Aggregate results over many episodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub episodes: usize,
    pub wins: PlayerMap<usize>,
    pub draws: usize,
    /// Episodes that hit the step limit or were aborted.
    pub unfinished: usize,
    pub mean_steps: f64,
}

impl EpisodeStats {
    #[must_use]
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        let mut stats = Self {
            episodes: summaries.len(),
            ..Self::default()
        };
        let mut total_steps = 0u64;
        for summary in summaries {
            total_steps += u64::from(summary.steps);
            match summary.result {
                Some(GameResult::Winner(player)) => stats.wins[player] += 1,
                Some(GameResult::Draw) => stats.draws += 1,
                None => stats.unfinished += 1,
            }
        }
        if !summaries.is_empty() {
            stats.mean_steps = total_steps as f64 / summaries.len() as f64;
        }
        stats
    }
}
