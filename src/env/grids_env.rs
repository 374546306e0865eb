//! Step-based environment over `GameState`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{legal_actions, ActionKind, ActionSpace, EnvError, GameAction, Observation, RewardConfig};
use crate::core::{ActionError, ConfigError, PlayerId, RulesConfig};
use crate::state::{GameBuilder, GameResult, GameState};

/// Environment settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub rules: RulesConfig,
    pub rewards: RewardConfig,
    /// Steps before an episode is truncated. `None` never truncates.
    pub max_steps: Option<u32>,
    /// End the turn automatically once action points hit zero.
    pub auto_end_turn: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            rewards: RewardConfig::default(),
            max_steps: Some(1000),
            auto_end_turn: true,
        }
    }
}

impl EnvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_auto_end_turn(mut self, auto_end_turn: bool) -> Self {
        self.auto_end_turn = auto_end_turn;
        self
    }
}

/// Diagnostics for one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Player who chose the action.
    pub player: PlayerId,
    /// Why the rules refused the action, if they did.
    pub refusal: Option<ActionError>,
    /// Set when the action didn't name anything; the episode ends.
    pub invalid: Option<EnvError>,
    /// The turn passed automatically after this action.
    pub auto_ended_turn: bool,
    pub result: Option<GameResult>,
    /// Steps taken this episode, including this one.
    pub steps: u32,
}

/// What `step` returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    /// The game has a winner, or the episode was aborted by an invalid action.
    pub terminated: bool,
    /// The game ended in a draw or hit the step limit.
    pub truncated: bool,
    pub info: StepInfo,
}

impl StepResult {
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Agent-facing wrapper around one game.
///
/// ```
/// use grids_tactics::env::{GameAction, GridsEnv};
///
/// let mut env = GridsEnv::new(42);
/// let result = env.step(&GameAction::draw_spell());
/// assert_eq!(result.observation.action_points, 6);
/// assert!(!result.is_done());
/// ```
#[derive(Clone, Debug)]
pub struct GridsEnv {
    config: EnvConfig,
    space: ActionSpace,
    state: GameState,
    steps: u32,
    aborted: bool,
}

impl GridsEnv {
    /// Environment with default settings.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(EnvConfig::default(), seed)
    }

    /// # Panics
    ///
    /// If `config.rules` fails `RulesConfig::validate`. Use
    /// `try_with_config` for caller-supplied rules.
    #[must_use]
    pub fn with_config(config: EnvConfig, seed: u64) -> Self {
        let state = GameBuilder::new().config(config.rules.clone()).build(seed);
        Self::from_state(config, state)
    }

    /// Like `with_config`, but reports an unusable board instead of panicking.
    pub fn try_with_config(config: EnvConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = GameBuilder::new().config(config.rules.clone()).try_build(seed)?;
        Ok(Self::from_state(config, state))
    }

    /// Wrap an existing state, e.g. a scenario built with `GameBuilder`.
    ///
    /// Later resets use the state's rules, not `config.rules`.
    #[must_use]
    pub fn from_state(mut config: EnvConfig, state: GameState) -> Self {
        config.rules = state.config().clone();
        Self {
            space: ActionSpace::new(state.grid()),
            config,
            state,
            steps: 0,
            aborted: false,
        }
    }

    /// Start a new episode.
    pub fn reset(&mut self, seed: u64) -> Observation {
        self.state = GameBuilder::new().config(self.config.rules.clone()).build(seed);
        self.steps = 0;
        self.aborted = false;
        self.observation()
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    #[must_use]
    pub fn legal_actions(&self) -> Vec<GameAction> {
        if self.aborted {
            return Vec::new();
        }
        legal_actions(&self.state)
    }

    /// Flat-index mask over the action space.
    #[must_use]
    pub fn legal_action_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.space.size()];
        for action in self.legal_actions() {
            if let Some(i) = self.space.encode(&action) {
                mask[i] = true;
            }
        }
        mask
    }

    fn is_truncated(&self) -> bool {
        self.state.result() == Some(GameResult::Draw) || self.config.max_steps.is_some_and(|max| self.steps >= max)
    }

    /// Apply a flat action index.
    pub fn step_index(&mut self, flat: usize) -> StepResult {
        match self.space.decode(flat) {
            Ok(action) => self.step(&action),
            Err(err) => {
                let player = self.state.current_player();
                self.abort(player, err)
            }
        }
    }

    /// Apply a raw `(kind, index, row, col)` tuple.
    pub fn step_tuple(&mut self, kind: u8, index: usize, row: i32, col: i32) -> StepResult {
        match ActionKind::try_from(kind) {
            Ok(kind) => self.step(&GameAction::new(kind, index, row, col)),
            Err(err) => {
                let player = self.state.current_player();
                self.abort(player, err)
            }
        }
    }

    /// Apply one action.
    pub fn step(&mut self, action: &GameAction) -> StepResult {
        let player = self.state.current_player();

        if self.aborted || self.state.is_over() {
            return self.finish(player, 0.0, Some(ActionError::GameOver), false);
        }

        let command = match action.resolve(&self.state) {
            Ok(command) => command,
            Err(err) => return self.abort(player, err),
        };
        self.steps += 1;

        let rewards = &self.config.rewards;
        let (mut reward, refusal) = match command.execute(&mut self.state) {
            Ok(()) => (rewards.for_success(action.kind), None),
            Err(err) => {
                debug!("{} refused {:?}: {}", player, action, err);
                (rewards.refused, Some(err))
            }
        };

        let mut auto_ended_turn = false;
        if self.config.auto_end_turn
            && action.kind != ActionKind::EndTurn
            && !self.state.is_over()
            && self.state.action_points() == 0
        {
            auto_ended_turn = self.state.end_turn().is_ok();
        }

        if let Some(GameResult::Winner(winner)) = self.state.result() {
            reward += if winner == player { rewards.win } else { rewards.loss };
        }

        self.finish(player, reward, refusal, auto_ended_turn)
    }

    fn abort(&mut self, player: PlayerId, err: EnvError) -> StepResult {
        debug!("{} sent an invalid action: {}", player, err);
        self.steps += 1;
        self.aborted = true;
        let mut result = self.finish(player, self.config.rewards.invalid, None, false);
        result.info.invalid = Some(err);
        result
    }

    fn finish(
        &self,
        player: PlayerId,
        reward: f32,
        refusal: Option<ActionError>,
        auto_ended_turn: bool,
    ) -> StepResult {
        let result = self.state.result();
        let terminated = self.aborted || matches!(result, Some(GameResult::Winner(_)));
        StepResult {
            observation: self.observation(),
            reward,
            terminated,
            truncated: !terminated && self.is_truncated(),
            info: StepInfo {
                player,
                refusal,
                invalid: None,
                auto_ended_turn,
                result,
                steps: self.steps,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;
    use crate::units::UnitKind;

    #[test]
    fn test_reset_observation() {
        let mut env = GridsEnv::new(1);
        let obs = env.reset(2);
        assert_eq!(obs.current_player, 1);
        assert_eq!(obs.action_points, 7);
        assert_eq!(env.steps(), 0);
    }

    #[test]
    fn test_deploy_reward() {
        let mut env = GridsEnv::new(42);
        let cell = env.state().valid_deploy_squares(PlayerId::ONE)[0];

        let result = env.step(&GameAction::deploy(0, cell));

        assert_eq!(result.reward, 0.5);
        assert!(!result.is_done());
        assert_eq!(result.observation.owner_at(cell), 1);
        assert_eq!(result.info.refusal, None);
    }

    #[test]
    fn test_refused_action_is_penalized_not_terminal() {
        let mut env = GridsEnv::new(42);
        // Commander at index 0 can't reach the far column.
        let result = env.step(&GameAction::move_unit(0, Cell::new(3, 8)));

        assert_eq!(result.reward, -0.1);
        assert!(matches!(result.info.refusal, Some(ActionError::Unreachable { .. })));
        assert!(!result.is_done());
        assert_eq!(result.observation.action_points, 7);
    }

    #[test]
    fn test_invalid_index_aborts() {
        let mut env = GridsEnv::new(42);
        let result = env.step(&GameAction::move_unit(9, Cell::new(0, 0)));

        assert_eq!(result.reward, -1.0);
        assert!(result.terminated);
        assert!(result.info.invalid.is_some());
        assert!(env.legal_actions().is_empty());

        let after = env.step(&GameAction::end_turn());
        assert!(after.terminated);
        assert_eq!(after.info.refusal, Some(ActionError::GameOver));
    }

    #[test]
    fn test_auto_end_turn() {
        let config = EnvConfig::default().with_rules(RulesConfig::default().with_action_points(1));
        let mut env = GridsEnv::with_config(config, 3);

        let result = env.step(&GameAction::draw_unit());
        assert!(result.info.auto_ended_turn);
        assert_eq!(result.observation.current_player, 2);
        assert_eq!(result.observation.action_points, 1);
        assert_eq!(result.info.player, PlayerId::ONE);
    }

    #[test]
    fn test_try_with_config_rejects_unusable_board() {
        for (rows, cols) in [(0, 10), (7, 1)] {
            let config = EnvConfig::default().with_rules(RulesConfig::default().with_board(rows, cols));
            let env = GridsEnv::try_with_config(config, 3);
            assert!(matches!(env, Err(ConfigError::BoardTooSmall { .. })));
        }

        let config = EnvConfig::default().with_rules(RulesConfig::default().with_board(3, 4));
        let env = GridsEnv::try_with_config(config, 3).unwrap();
        assert_eq!(env.state().grid().cols(), 4);
    }

    #[test]
    fn test_reset_keeps_scenario_rules() {
        let rules = RulesConfig::default().with_board(5, 6).with_action_points(2);
        let state = GameBuilder::new().config(rules.clone()).build(1);
        let mut env = GridsEnv::from_state(EnvConfig::default(), state);

        env.reset(9);
        assert_eq!(env.state().config(), &rules);
        assert_eq!(env.state().action_points(), 2);
    }

    #[test]
    fn test_win_reward_and_termination() {
        let state = GameBuilder::new()
            .unit(UnitKind::Viking, PlayerId::ONE, Cell::new(3, 8))
            .build(1);
        let mut env = GridsEnv::from_state(EnvConfig::default(), state);
        let attacker = env.state().units().position(|u| u.kind == UnitKind::Viking).unwrap();

        for _ in 0..2 {
            let result = env.step(&GameAction::attack(attacker, Cell::new(3, 9)));
            assert!(!result.is_done());
            env.step(&GameAction::end_turn());
            env.step(&GameAction::end_turn());
        }
        let result = env.step(&GameAction::attack(attacker, Cell::new(3, 9)));

        assert!(result.terminated);
        assert!(!result.truncated);
        assert_eq!(result.reward, 0.5 + 10.0);
        assert_eq!(result.info.result, Some(GameResult::Winner(PlayerId::ONE)));
    }

    #[test]
    fn test_step_limit_truncates() {
        let config = EnvConfig::default().with_max_steps(Some(2));
        let mut env = GridsEnv::with_config(config, 3);

        assert!(!env.step(&GameAction::end_turn()).truncated);
        let result = env.step(&GameAction::end_turn());
        assert!(result.truncated);
        assert!(!result.terminated);
    }

    #[test]
    fn test_mask_matches_legal_actions() {
        let env = GridsEnv::new(5);
        let mask = env.legal_action_mask();
        assert_eq!(mask.len(), env.action_space().size());
        assert_eq!(mask.iter().filter(|m| **m).count(), env.legal_actions().len());
        let end_turn = env.action_space().encode(&GameAction::end_turn()).unwrap();
        assert!(mask[end_turn]);
    }

    #[test]
    fn test_step_index() {
        let mut env = GridsEnv::new(5);
        let flat = env.action_space().encode(&GameAction::draw_spell()).unwrap();
        let result = env.step_index(flat);
        assert_eq!(result.reward, 0.1);

        let result = env.step_index(env.action_space().size());
        assert!(result.terminated);
    }

    #[test]
    fn test_step_tuple() {
        let mut env = GridsEnv::new(5);
        let result = env.step_tuple(5, 0, 0, 0);
        assert_eq!(result.reward, 0.1);

        let result = env.step_tuple(9, 0, 0, 0);
        assert!(result.terminated);
        assert_eq!(result.info.invalid, Some(EnvError::UnknownActionKind(9)));
    }
}
