use rand::{Rng, rngs::StdRng};

use super::random_room;
use crate::maze::{Cell, Direction, Grid, Point};

/// Wilson's algorithm.
///
/// Random walks start from rooms outside the maze and record, in each cell they pass, the
/// direction they arrived from. Running into the current walk erases the loop. Running into the
/// maze commits the whole walk as a new branch.
pub fn loop_erased_walk(grid: &mut Grid, rng: &mut StdRng) {
    let root = random_room(grid, rng);
    grid.update(root, |cell| cell.insert(Cell::PASSAGE | Cell::BUILDER));

    let rooms = grid.rooms().collect::<Vec<_>>();
    // Rooms only ever join the maze, so every room before the cursor stays built.
    let mut cursor = 0;
    loop {
        while cursor < rooms.len() && grid[rooms[cursor]].contains(Cell::BUILDER) {
            cursor += 1;
        }
        let Some(&origin) = rooms.get(cursor) else {
            break;
        };
        walk_into_maze(grid, origin, rng);
    }
}

fn walk_into_maze(grid: &mut Grid, origin: Point, rng: &mut StdRng) {
    grid.update(origin, |cell| {
        cell.insert(Cell::WALK);
        cell.set_backtrack(None);
    });
    let mut walk = origin;
    loop {
        let neighbors = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                grid.interior_step(walk, direction, 2)
                    .map(|next| (direction, next))
            })
            .collect::<Vec<_>>();
        let (direction, next) = neighbors[rng.random_range(0..neighbors.len())];

        if grid[next].contains(Cell::BUILDER) {
            grid.join_rooms(walk, next);
            commit_walk(grid, walk);
            return;
        }
        if grid[next].contains(Cell::WALK) {
            erase_loop(grid, walk, next);
        } else {
            grid.update(next, |cell| {
                cell.insert(Cell::WALK);
                cell.set_backtrack(Some(direction.opposite()));
            });
        }
        walk = next;
    }
}

/// Carve every step of the walk ending at `tail`, following the arrival marks back to the origin.
fn commit_walk(grid: &mut Grid, tail: Point) {
    let mut cur = tail;
    loop {
        let back = grid[cur].backtrack();
        grid.update(cur, |cell| {
            cell.remove(Cell::WALK);
            cell.set_backtrack(None);
            cell.insert(Cell::PASSAGE | Cell::BUILDER);
        });
        match back.and_then(|back| grid.interior_step(cur, back, 2)) {
            Some(parent) => {
                grid.join_rooms(cur, parent);
                cur = parent;
            }
            None => break,
        }
    }
}

/// Forget the walk between `tail` and `loop_root`. The root keeps its own mark.
pub(super) fn erase_loop(grid: &mut Grid, tail: Point, loop_root: Point) {
    let mut cur = tail;
    while cur != loop_root {
        let back = grid[cur].backtrack();
        grid.update(cur, |cell| {
            cell.remove(Cell::WALK);
            cell.set_backtrack(None);
        });
        match back.and_then(|back| grid.interior_step(cur, back, 2)) {
            Some(parent) => cur = parent,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::tests::assert_spanning_tree, maze::get_rng};

    #[test]
    fn test_loop_erased_spanning_tree() {
        for seed in 0..5 {
            let mut grid = Grid::new(13, 17);
            loop_erased_walk(&mut grid, &mut get_rng(Some(seed)));
            assert_spanning_tree(&grid);
        }
    }

    #[test]
    fn test_erase_loop_clears_walk() {
        let mut grid = Grid::new(7, 7);
        let a = Point::new(1, 1);
        let b = Point::new(1, 3);
        let c = Point::new(3, 3);
        grid.update(a, |cell| cell.insert(Cell::WALK));
        grid.update(b, |cell| {
            cell.insert(Cell::WALK);
            cell.set_backtrack(Some(Direction::West));
        });
        grid.update(c, |cell| {
            cell.insert(Cell::WALK);
            cell.set_backtrack(Some(Direction::North));
        });
        erase_loop(&mut grid, c, a);
        assert!(!grid[c].contains(Cell::WALK));
        assert!(!grid[b].contains(Cell::WALK));
        assert_eq!(grid[b].backtrack(), None);
        assert!(grid[a].contains(Cell::WALK));
    }
}
