//! Environment integration tests: the action contract, rewards and episode flow.

use grids_tactics::agents::{play_episodes, Agent, EpisodeStats, RandomAgent, SelfPlayConfig};
use grids_tactics::core::{ActionError, Cell, PlayerId, PlayerMap, RulesConfig};
use grids_tactics::env::{ActionKind, EnvConfig, EnvError, GameAction, GridsEnv, RewardConfig};
use grids_tactics::state::{GameBuilder, GameResult};
use grids_tactics::units::UnitKind;

fn duel_env() -> GridsEnv {
    let state = GameBuilder::new()
        .empty_board()
        .unit(UnitKind::Commander, PlayerId::ONE, Cell::new(3, 0))
        .unit_with(UnitKind::Commander, PlayerId::TWO, Cell::new(3, 9), |u| u.health = 1)
        .unit(UnitKind::Warrior, PlayerId::ONE, Cell::new(3, 8))
        .build(7);
    GridsEnv::from_state(EnvConfig::default(), state)
}

// =============================================================================
// Observations
// =============================================================================

#[test]
fn test_observation_contains_padded_hands() {
    let mut env = GridsEnv::new(1);
    let obs = env.reset(5);

    assert_eq!(obs.unit_hand.len(), 10);
    assert_eq!(obs.spell_hand.len(), 10);
    assert_eq!(obs.unit_hand.iter().filter(|id| **id != 0).count(), 3);
    assert_eq!(obs.spell_hand.iter().filter(|id| **id != 0).count(), 3);
    assert_eq!(obs.opponent_hand, 6);
    assert_eq!(obs.board_owner.len(), 70);
    assert_eq!(obs.owner_at(Cell::new(3, 0)), 1);
    assert_eq!(obs.owner_at(Cell::new(3, 9)), 2);
    assert_eq!(obs.health_at(Cell::new(3, 9)), 150);
}

#[test]
fn test_observation_tensor_matches_layout() {
    let env = GridsEnv::new(3);
    let obs = env.observation();
    let tensor = obs.to_tensor();

    assert_eq!(tensor.len(), obs.tensor_len());
    assert_eq!(tensor[0], 1.0);
    assert_eq!(tensor[1], 7.0);
}

// =============================================================================
// Rewards
// =============================================================================

#[test]
fn test_deploy_action() {
    let mut env = GridsEnv::new(42);
    let cell = env.state().valid_deploy_squares(PlayerId::ONE)[0];

    let result = env.step(&GameAction::deploy(0, cell));

    assert_eq!(result.reward, RewardConfig::default().deploy);
    assert!(env.state().unit_at(cell).is_some());
    assert!(!result.terminated && !result.truncated);
}

#[test]
fn test_play_card_action() {
    let mut env = GridsEnv::new(42);
    assert!(env.state().hand(PlayerId::ONE).spell_count() > 0);

    // Every default spell accepts an empty cell.
    let result = env.step(&GameAction::play_card(0, Cell::new(0, 0)));

    assert_eq!(result.info.refusal, None);
    assert!(result.reward >= RewardConfig::default().play_card);
    assert_eq!(env.state().hand(PlayerId::ONE).spell_count(), 2);
}

#[test]
fn test_attack_action() {
    let state = GameBuilder::new()
        .empty_board()
        .unit(UnitKind::Warrior, PlayerId::ONE, Cell::new(0, 0))
        .unit(UnitKind::Warrior, PlayerId::TWO, Cell::new(0, 1))
        .build(1);
    let mut env = GridsEnv::from_state(EnvConfig::default(), state);

    let result = env.step(&GameAction::attack(0, Cell::new(0, 1)));

    assert_eq!(result.reward, RewardConfig::default().attack);
    assert_eq!(result.observation.health_at(Cell::new(0, 2)), 60);
    assert_eq!(result.observation.owner_at(Cell::new(0, 1)), 0);
}

#[test]
fn test_attack_on_empty_cell_is_refused() {
    let mut env = GridsEnv::new(42);

    let result = env.step(&GameAction::attack(0, Cell::new(0, 0)));

    assert_eq!(result.info.refusal, Some(ActionError::InvalidTarget));
    assert_eq!(result.reward, RewardConfig::default().refused);
    assert!(!result.is_done());
}

#[test]
fn test_draw_spell_action() {
    let mut env = GridsEnv::new(42);
    let before = env.state().hand(PlayerId::ONE).spell_count();

    let result = env.step(&GameAction::draw_spell());

    assert_eq!(env.state().hand(PlayerId::ONE).spell_count(), before + 1);
    assert_eq!(env.state().action_points(), 6);
    assert_eq!(result.reward, RewardConfig::default().draw);
}

// =============================================================================
// Episode flow
// =============================================================================

#[test]
fn test_env_terminates_when_commander_dies() {
    let mut env = duel_env();

    let result = env.step(&GameAction::attack(2, Cell::new(3, 9)));

    assert!(result.terminated);
    assert!(!result.truncated);
    assert_eq!(result.info.result, Some(GameResult::Winner(PlayerId::ONE)));
    assert_eq!(result.reward, 0.5 + 10.0);
    assert_eq!(env.state().winner(), Some(PlayerId::ONE));
    assert!(env.legal_actions().is_empty());

    let after = env.step(&GameAction::end_turn());
    assert!(after.terminated);
    assert_eq!(after.info.refusal, Some(ActionError::GameOver));
    assert_eq!(after.reward, 0.0);
}

#[test]
fn test_auto_end_turn_at_zero_action_points() {
    let config = EnvConfig::default().with_rules(RulesConfig::default().with_action_points(1));
    let mut env = GridsEnv::with_config(config, 11);

    let result = env.step(&GameAction::move_unit(0, Cell::new(3, 1)));

    assert!(result.info.auto_ended_turn);
    assert_eq!(result.info.player, PlayerId::ONE);
    assert_eq!(result.observation.current_player, 2);
    assert_eq!(result.observation.action_points, 1);
}

#[test]
fn test_manual_turns_without_auto_end() {
    let config = EnvConfig::default()
        .with_rules(RulesConfig::default().with_action_points(1))
        .with_auto_end_turn(false);
    let mut env = GridsEnv::with_config(config, 11);

    let result = env.step(&GameAction::move_unit(0, Cell::new(3, 1)));

    assert!(!result.info.auto_ended_turn);
    assert_eq!(result.observation.current_player, 1);
    assert_eq!(result.observation.action_points, 0);
    assert_eq!(env.legal_actions(), vec![GameAction::end_turn()]);
}

#[test]
fn test_malformed_actions_abort_the_episode() {
    let mut env = GridsEnv::new(1);

    let result = env.step_tuple(9, 0, 0, 0);
    assert!(result.terminated);
    assert_eq!(result.info.invalid, Some(EnvError::UnknownActionKind(9)));
    assert_eq!(result.reward, RewardConfig::default().invalid);
    assert!(env.legal_actions().is_empty());

    env.reset(2);
    let result = env.step(&GameAction::move_unit(17, Cell::new(0, 0)));
    assert!(result.terminated);
    assert_eq!(
        result.info.invalid,
        Some(EnvError::IndexOutOfRange { kind: ActionKind::Move, index: 17 })
    );

    env.reset(3);
    let size = env.action_space().size();
    let result = env.step_index(size);
    assert_eq!(result.info.invalid, Some(EnvError::FlatIndexOutOfRange(size)));
}

#[test]
fn test_mask_agrees_with_legal_actions() {
    let env = GridsEnv::new(8);
    let legal = env.legal_actions();
    let mask = env.legal_action_mask();

    assert_eq!(mask.len(), env.action_space().size());
    assert_eq!(mask.iter().filter(|m| **m).count(), legal.len());
    for action in &legal {
        let flat = env.action_space().encode(action).unwrap();
        assert!(mask[flat]);
        assert_eq!(env.action_space().decode(flat).unwrap().normalized(), action.normalized());
    }
}

#[test]
fn test_flat_step_matches_tuple_step() {
    let mut by_tuple = GridsEnv::new(4);
    let mut by_index = GridsEnv::new(4);
    let action = by_tuple.legal_actions()[0];
    let flat = by_index.action_space().encode(&action).unwrap();

    let a = by_tuple.step_tuple(action.kind.id(), action.index, action.row, action.col);
    let b = by_index.step_index(flat);

    assert_eq!(a.observation, b.observation);
    assert_eq!(a.reward, b.reward);
}

// =============================================================================
// Self-play
// =============================================================================

fn random_agents(seed: u64) -> PlayerMap<Box<dyn Agent>> {
    PlayerMap::new(|player| Box::new(RandomAgent::new(seed * 2 + u64::from(player.id()))) as Box<dyn Agent>)
}

#[test]
fn test_random_self_play_stays_legal() {
    let config = SelfPlayConfig::new().with_max_steps(300).with_seed_offset(100);
    let summaries = play_episodes(&config, random_agents, 4);

    assert_eq!(summaries.len(), 4);
    for summary in &summaries {
        assert!(!summary.aborted);
        assert!(summary.steps <= 300);
    }

    let stats = EpisodeStats::from_summaries(&summaries);
    assert_eq!(stats.episodes, 4);
    assert_eq!(
        stats.wins[PlayerId::ONE] + stats.wins[PlayerId::TWO] + stats.draws + stats.unfinished,
        4
    );
}
