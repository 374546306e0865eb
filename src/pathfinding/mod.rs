//! Spatial search over the board.
//!
//! Both searches treat every cell in `blocked` as impassable and use unit
//! step cost over 4-connected moves, so their answers agree: a cell is in
//! `reachable_cells(start, k)` exactly when `find_path(start, cell)` has at
//! most `k` steps.

pub mod astar;
pub mod reachability;

use smallvec::SmallVec;

use crate::core::Cell;

/// A sequence of cells from a start (exclusive) to a goal (inclusive).
pub type Path = SmallVec<[Cell; 8]>;

pub use astar::find_path;
pub use reachability::reachable_cells;
