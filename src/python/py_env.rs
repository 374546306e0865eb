//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::env::{EnvConfig, GameAction, GridsEnv, Observation, StepResult};

type ActionTuple = (u8, usize, i32, i32);

fn action_tuple(action: &GameAction) -> ActionTuple {
    (action.kind.id(), action.index, action.row, action.col)
}

fn observation_dict<'py>(py: Python<'py>, obs: &Observation) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("current_player", obs.current_player)?;
    dict.set_item("action_points", obs.action_points)?;
    dict.set_item("opponent_hand", obs.opponent_hand)?;
    dict.set_item("board_owner", obs.board_owner.clone())?;
    dict.set_item("board_health", obs.board_health.clone())?;
    dict.set_item("unit_hand", obs.unit_hand.clone())?;
    dict.set_item("spell_hand", obs.spell_hand.clone())?;
    Ok(dict)
}

type StepTuple<'py> = (Bound<'py, PyDict>, f32, bool, bool, Bound<'py, PyDict>);

fn step_tuple<'py>(py: Python<'py>, result: &StepResult) -> PyResult<StepTuple<'py>> {
    let info = PyDict::new_bound(py);
    info.set_item("player", result.info.player.id())?;
    info.set_item("refusal", result.info.refusal.map(|e| e.to_string()))?;
    info.set_item("invalid", result.info.invalid.map(|e| e.to_string()))?;
    info.set_item("auto_ended_turn", result.info.auto_ended_turn)?;
    info.set_item("winner", result.info.result.and_then(|r| r.winner()).map(|p| p.id()))?;
    info.set_item("steps", result.info.steps)?;

    Ok((
        observation_dict(py, &result.observation)?,
        result.reward,
        result.terminated,
        result.truncated,
        info,
    ))
}

/// Python wrapper for `GridsEnv`.
///
/// Actions are `(kind, index, row, col)` tuples or flat integers.
#[pyclass(name = "GridsEnv")]
pub struct PyGridsEnv {
    inner: GridsEnv,
}

#[pymethods]
impl PyGridsEnv {
    /// Create an environment.
    ///
    /// # Arguments
    /// - seed: RNG seed for the first game
    /// - max_steps: steps before truncation (None for no limit)
    /// - auto_end_turn: pass the turn automatically at zero action points
    #[new]
    #[pyo3(signature = (seed = 42, max_steps = Some(1000), auto_end_turn = true))]
    fn new(seed: u64, max_steps: Option<u32>, auto_end_turn: bool) -> Self {
        let config = EnvConfig::default()
            .with_max_steps(max_steps)
            .with_auto_end_turn(auto_end_turn);
        Self {
            inner: GridsEnv::with_config(config, seed),
        }
    }

    /// Start a new game. Returns `(observation, info)`.
    #[pyo3(signature = (seed = 0))]
    fn reset<'py>(&mut self, py: Python<'py>, seed: u64) -> PyResult<(Bound<'py, PyDict>, Bound<'py, PyDict>)> {
        let obs = self.inner.reset(seed);
        Ok((observation_dict(py, &obs)?, PyDict::new_bound(py)))
    }

    /// Apply a `(kind, index, row, col)` action.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`.
    fn step<'py>(&mut self, py: Python<'py>, action: ActionTuple) -> PyResult<StepTuple<'py>> {
        let (kind, index, row, col) = action;
        let result = self.inner.step_tuple(kind, index, row, col);
        step_tuple(py, &result)
    }

    /// Apply a flat action index.
    fn step_index<'py>(&mut self, py: Python<'py>, flat: usize) -> PyResult<StepTuple<'py>> {
        let result = self.inner.step_index(flat);
        step_tuple(py, &result)
    }

    /// Legal actions as `(kind, index, row, col)` tuples.
    fn legal_actions(&self) -> Vec<ActionTuple> {
        self.inner.legal_actions().iter().map(action_tuple).collect()
    }

    /// Legal actions as a boolean mask over flat indices.
    fn legal_action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_vec_bound(py, self.inner.legal_action_mask())
    }

    /// Current observation as a dict.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        observation_dict(py, &self.inner.observation())
    }

    /// Current observation as a flat float32 array.
    fn observation_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_vec_bound(py, self.inner.observation().to_tensor())
    }

    /// Encode a `(kind, index, row, col)` action as a flat index.
    fn encode_action(&self, action: ActionTuple) -> Option<usize> {
        let (kind, index, row, col) = action;
        let kind = crate::env::ActionKind::try_from(kind).ok()?;
        self.inner
            .action_space()
            .encode(&GameAction::new(kind, index, row, col))
    }

    #[getter]
    fn action_space_size(&self) -> usize {
        self.inner.action_space().size()
    }

    #[getter]
    fn current_player(&self) -> u8 {
        self.inner.state().current_player().id()
    }

    #[getter]
    fn action_points(&self) -> u32 {
        self.inner.state().action_points()
    }

    #[getter]
    fn turn_number(&self) -> u32 {
        self.inner.state().turn_number()
    }

    /// Winning player id, if any.
    #[getter]
    fn winner(&self) -> Option<u8> {
        self.inner.state().winner().map(|p| p.id())
    }

    fn __repr__(&self) -> String {
        let state = self.inner.state();
        format!(
            "GridsEnv(turn={}, player={}, ap={}, units={})",
            state.turn_number(),
            state.current_player().id(),
            state.action_points(),
            state.unit_count()
        )
    }
}
