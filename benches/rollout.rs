//! Benchmarks for the operations agents call in tight loops.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use grids_tactics::agents::{run_episode, Agent, RandomAgent};
use grids_tactics::core::PlayerMap;
use grids_tactics::env::{legal_actions, EnvConfig, GridsEnv};
use grids_tactics::state::GameState;

fn bench_state_clone(c: &mut Criterion) {
    let state = GameState::new(42);

    c.bench_function("state_clone", |b| {
        b.iter(|| black_box(state.clone()));
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = GameState::new(42);

    c.bench_function("legal_actions_opening", |b| {
        b.iter(|| black_box(legal_actions(black_box(&state))));
    });
}

fn bench_random_episode(c: &mut Criterion) {
    let config = EnvConfig::default().with_max_steps(Some(500));
    let mut env = GridsEnv::with_config(config, 0);

    c.bench_function("random_episode", |b| {
        b.iter(|| {
            let mut agents: PlayerMap<Box<dyn Agent>> =
                PlayerMap::new(|p| Box::new(RandomAgent::new(u64::from(p.id()))) as Box<dyn Agent>);
            black_box(run_episode(&mut env, &mut agents, black_box(7)))
        });
    });
}

criterion_group!(benches, bench_state_clone, bench_legal_actions, bench_random_episode);
criterion_main!(benches);
