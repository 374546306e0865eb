//! Board geometry: cells, bounds, and Manhattan distance.
//!
//! The board is a fixed `rows x cols` rectangle, 7x10 in the reference
//! configuration. Cells are addressed as `(row, col)` with row 0 at the
//! bottom edge and column 0 at player 1's deployment edge.
//!
//! Coordinates are signed so that offsets (knockback, neighbour lookup)
//! can step off the board and be rejected by `Grid::contains`.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A board coordinate.
///
/// Ordering is row-major, which gives deterministic iteration when cells
/// are stored in ordered collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell.
    ///
    /// ```
    /// use grids_tactics::core::Cell;
    ///
    /// assert_eq!(Cell::new(0, 0).distance(Cell::new(1, 1)), 2);
    /// assert_eq!(Cell::new(3, 4).distance(Cell::new(3, 4)), 0);
    /// ```
    #[must_use]
    pub const fn distance(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Offset this cell by a row and column delta.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// The cell one step further from `origin`, along the sign of each axis.
    ///
    /// Used for knockback: a unit hit diagonally is pushed diagonally.
    /// Returns `self` when `origin == self`.
    #[must_use]
    pub const fn away_from(self, origin: Cell) -> Self {
        self.offset(
            (self.row - origin.row).signum(),
            (self.col - origin.col).signum(),
        )
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal step offsets in search order: up, down, left, right.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: i32,
    cols: i32,
}

impl Grid {
    /// Create a grid of `rows x cols` cells.
    #[must_use]
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one cell");
        Self { rows, cols }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// Check if a cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.cols
    }

    /// Row-major index of a cell, or `None` if off the board.
    #[must_use]
    pub const fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.row * self.cols + cell.col) as usize)
        } else {
            None
        }
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// In-bounds orthogonal neighbours of a cell, in `DIRECTIONS` order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&(dr, dc)| cell.offset(dr, dc))
            .filter(move |&c| self.contains(c))
    }

    /// The column a player deploys new units onto.
    ///
    /// Player 1 deploys on the first column, player 2 on the last.
    #[must_use]
    pub const fn deployment_column(&self, player: PlayerId) -> i32 {
        if player.is_first() {
            0
        } else {
            self.cols - 1
        }
    }
}

/// Manhattan distance between two cells.
#[must_use]
pub const fn manhattan_distance(a: Cell, b: Cell) -> u32 {
    a.distance(b)
}
