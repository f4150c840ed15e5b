use rand::{rngs::StdRng, seq::SliceRandom};

use super::{random_room, unbuilt_room};
use crate::maze::{Cell, Direction, Grid};

/// Depth-first carving with O(1) auxiliary memory.
///
/// Every carved room records the direction back to the room it was carved from. When the walk
/// runs out of unbuilt neighbors it follows that mark home, erasing it on the way out.
pub fn recursive_backtrack(grid: &mut Grid, rng: &mut StdRng) {
    let start = random_room(grid, rng);
    grid.update(start, |cell| {
        cell.insert(Cell::PASSAGE | Cell::BUILDER);
        cell.set_backtrack(None);
    });

    let mut directions = Direction::ALL;
    let mut cur = start;
    loop {
        // The unvisited neighbor is random because the directions are reshuffled every step
        directions.shuffle(rng);
        let next = directions
            .iter()
            .find_map(|&direction| unbuilt_room(grid, cur, direction).map(|next| (direction, next)));

        if let Some((direction, next)) = next {
            grid.join_rooms(cur, next);
            grid.update(next, |cell| {
                cell.insert(Cell::BUILDER);
                cell.set_backtrack(Some(direction.opposite()));
            });
            cur = next;
            continue;
        }

        match grid[cur]
            .backtrack()
            .and_then(|back| grid.interior_step(cur, back, 2))
        {
            Some(parent) => {
                grid.update(cur, |cell| cell.set_backtrack(None));
                cur = parent;
            }
            // Only the start has no mark
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::tests::assert_spanning_tree, maze::get_rng};

    #[test]
    fn test_recursive_backtrack_spanning_tree() {
        for seed in 0..5 {
            let mut grid = Grid::new(15, 21);
            recursive_backtrack(&mut grid, &mut get_rng(Some(seed)));
            assert_spanning_tree(&grid);
        }
    }

    #[test]
    fn test_recursive_backtrack_leaves_no_marks() {
        let mut grid = Grid::new(9, 9);
        recursive_backtrack(&mut grid, &mut get_rng(Some(42)));
        assert!(grid.cells().iter().all(|cell| cell.backtrack().is_none()));
    }
}
