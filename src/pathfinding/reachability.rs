//! Breadth-first reachability within a step budget.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::core::{Cell, Grid};

/// Every distinct cell reachable from `start` in at most `range` steps.
///
/// Blocked cells are neither entered nor returned. The start cell is not
/// included. Results are in BFS order (nearest first), and every returned
/// cell has a `find_path` path of length at most `range`.
#[must_use]
pub fn reachable_cells(grid: &Grid, start: Cell, range: u32, blocked: &FxHashSet<Cell>) -> Vec<Cell> {
    let mut reachable = Vec::new();
    let mut visited: FxHashSet<Cell> = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(start);
    queue.push_back((start, 0u32));

    while let Some((cell, distance)) = queue.pop_front() {
        if distance >= range {
            continue;
        }
        for neighbor in grid.neighbors(cell) {
            if blocked.contains(&neighbor) || !visited.insert(neighbor) {
                continue;
            }
            reachable.push(neighbor);
            queue.push_back((neighbor, distance + 1));
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::find_path;

    #[test]
    fn test_open_board_diamond() {
        let grid = Grid::new(7, 10);
        let cells = reachable_cells(&grid, Cell::new(3, 5), 2, &FxHashSet::default());
        // Manhattan diamond of radius 2 minus the centre.
        assert_eq!(cells.len(), 12);
        assert!(!cells.contains(&Cell::new(3, 5)));
    }

    #[test]
    fn test_zero_range() {
        let grid = Grid::new(7, 10);
        assert!(reachable_cells(&grid, Cell::new(3, 5), 0, &FxHashSet::default()).is_empty());
    }

    #[test]
    fn test_blocked_cells_excluded() {
        let grid = Grid::new(7, 10);
        let blocked: FxHashSet<Cell> = [Cell::new(0, 1)].into_iter().collect();
        let cells = reachable_cells(&grid, Cell::new(0, 0), 2, &blocked);

        assert!(!cells.contains(&Cell::new(0, 1)));
        assert!(cells.contains(&Cell::new(1, 1)));
        assert!(!cells.contains(&Cell::new(0, 2)));
    }

    #[test]
    fn test_agrees_with_astar() {
        let grid = Grid::new(7, 10);
        let blocked: FxHashSet<Cell> =
            [Cell::new(2, 2), Cell::new(2, 3), Cell::new(3, 2), Cell::new(1, 4)]
                .into_iter()
                .collect();
        let start = Cell::new(2, 4);

        for range in 0..5 {
            let cells = reachable_cells(&grid, start, range, &blocked);
            for cell in &cells {
                let path = find_path(&grid, start, *cell, &blocked);
                assert!(!path.is_empty());
                assert!(path.len() as u32 <= range);
            }
            for cell in grid.cells() {
                if cell == start || cells.contains(&cell) {
                    continue;
                }
                let path = find_path(&grid, start, cell, &blocked);
                assert!(path.is_empty() || path.len() as u32 > range);
            }
        }
    }
}
