//! A* shortest path on the 4-connected grid.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use super::Path;
use crate::core::{Cell, Grid};

/// Find a shortest path from `start` to `goal`.
///
/// The returned path excludes `start` and ends at `goal`, so its length is
/// the number of steps. It is empty when the goal is off the board, equal
/// to the start, blocked, or unreachable.
///
/// Cells in `blocked` are never entered. The start cell is never re-entered
/// either way, so it doesn't matter whether `blocked` contains it.
///
/// Ties on f-score are broken by push order, oldest first, which makes the
/// result deterministic.
///
/// ```
/// use grids_tactics::core::{Cell, Grid};
/// use grids_tactics::pathfinding::find_path;
/// use rustc_hash::FxHashSet;
///
/// let grid = Grid::new(7, 10);
/// let path = find_path(&grid, Cell::new(0, 0), Cell::new(0, 3), &FxHashSet::default());
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.last(), Some(&Cell::new(0, 3)));
/// ```
#[must_use]
pub fn find_path(grid: &Grid, start: Cell, goal: Cell, blocked: &FxHashSet<Cell>) -> Path {
    if !grid.contains(goal) || goal == start || blocked.contains(&goal) {
        return Path::new();
    }

    let mut open: BinaryHeap<Reverse<(u32, u64, Cell)>> = BinaryHeap::new();
    let mut came_from: FxHashMap<Cell, Cell> = FxHashMap::default();
    let mut g_score: FxHashMap<Cell, u32> = FxHashMap::default();
    let mut sequence = 0u64;

    g_score.insert(start, 0);
    open.push(Reverse((start.distance(goal), sequence, start)));

    while let Some(Reverse((f, _, current))) = open.pop() {
        if current == goal {
            return reconstruct(&came_from, current);
        }

        let Some(&g) = g_score.get(&current) else {
            continue;
        };
        // Stale entry: a cheaper route to `current` was found after this push.
        if f > g + current.distance(goal) {
            continue;
        }

        for neighbor in grid.neighbors(current) {
            if blocked.contains(&neighbor) {
                continue;
            }
            let tentative = g + 1;
            if g_score.get(&neighbor).map_or(true, |&known| tentative < known) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                sequence += 1;
                open.push(Reverse((tentative + neighbor.distance(goal), sequence, neighbor)));
            }
        }
    }

    Path::new()
}

fn reconstruct(came_from: &FxHashMap<Cell, Cell>, goal: Cell) -> Path {
    let mut path = Path::new();
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(current);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(cells: &[(i32, i32)]) -> FxHashSet<Cell> {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_straight_line() {
        let grid = Grid::new(7, 10);
        let path = find_path(&grid, Cell::new(3, 0), Cell::new(3, 4), &FxHashSet::default());

        assert_eq!(
            path.as_slice(),
            &[Cell::new(3, 1), Cell::new(3, 2), Cell::new(3, 3), Cell::new(3, 4)]
        );
    }

    #[test]
    fn test_steps_are_orthogonal() {
        let grid = Grid::new(7, 10);
        let start = Cell::new(0, 0);
        let path = find_path(&grid, start, Cell::new(5, 6), &blocked(&[(1, 1), (2, 2)]));

        assert_eq!(path.len(), 11);
        let mut previous = start;
        for &cell in &path {
            assert_eq!(previous.distance(cell), 1);
            previous = cell;
        }
    }

    #[test]
    fn test_detour_around_wall() {
        let grid = Grid::new(7, 10);
        // Wall across column 1 except the top row.
        let wall = blocked(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (5, 1)]);
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(0, 2), &wall);

        assert_eq!(path.len(), 14);
        assert!(path.iter().all(|c| !wall.contains(c)));
    }

    #[test]
    fn test_blocked_goal_is_unreachable() {
        let grid = Grid::new(7, 10);
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(0, 2), &blocked(&[(0, 2)]));
        assert!(path.is_empty());
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        let grid = Grid::new(7, 10);
        let ring = blocked(&[(2, 3), (4, 3), (3, 2), (3, 4)]);
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(3, 3), &ring);
        assert!(path.is_empty());
    }

    #[test]
    fn test_goal_off_board_or_at_start() {
        let grid = Grid::new(7, 10);
        let none = FxHashSet::default();
        assert!(find_path(&grid, Cell::new(0, 0), Cell::new(-1, 0), &none).is_empty());
        assert!(find_path(&grid, Cell::new(0, 0), Cell::new(0, 10), &none).is_empty());
        assert!(find_path(&grid, Cell::new(2, 2), Cell::new(2, 2), &none).is_empty());
    }

    #[test]
    fn test_start_in_blocked_set_is_fine() {
        let grid = Grid::new(7, 10);
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(1, 1), &blocked(&[(0, 0), (0, 1)]));
        assert_eq!(path.as_slice(), &[Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn test_deterministic() {
        let grid = Grid::new(7, 10);
        let obstacles = blocked(&[(2, 2), (3, 3)]);
        let a = find_path(&grid, Cell::new(0, 0), Cell::new(6, 9), &obstacles);
        let b = find_path(&grid, Cell::new(0, 0), Cell::new(6, 9), &obstacles);
        assert_eq!(a, b);
    }
}
