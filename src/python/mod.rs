//! Python bindings for the grids-tactics engine.
//!
//! Exposes `GridsEnv` for reinforcement-learning loops written in Python.
//!
//! # Quick Start
//!
//! ```python
//! import grids_tactics as gt
//!
//! env = gt.GridsEnv(seed=42)
//! obs = env.reset(seed=1)
//! actions = env.legal_actions()
//! obs, reward, terminated, truncated, info = env.step(actions[0])
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// grids-tactics: a two-player grid tactics engine.
#[pymodule]
fn grids_tactics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGridsEnv>()?;
    m.add("ACTION_KINDS", crate::env::ActionKind::COUNT)?;
    Ok(())
}
