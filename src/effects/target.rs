//! Card targets.

use serde::{Deserialize, Serialize};

use crate::core::Cell;
use crate::state::GameState;
use crate::units::UnitId;

/// What a card is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Unit(UnitId),
    Cell(Cell),
}

impl Target {
    /// Target whatever stands on `cell`: its unit if occupied, else the
    /// cell itself.
    #[must_use]
    pub fn at(state: &GameState, cell: Cell) -> Self {
        match state.unit_at(cell) {
            Some(unit) => Target::Unit(unit.id),
            None => Target::Cell(cell),
        }
    }
}

impl From<UnitId> for Target {
    fn from(id: UnitId) -> Self {
        Target::Unit(id)
    }
}

impl From<Cell> for Target {
    fn from(cell: Cell) -> Self {
        Target::Cell(cell)
    }
}
