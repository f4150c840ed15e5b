use rand::{Rng, rngs::StdRng};

use super::{arena::open_arena, loop_erased::erase_loop};
use crate::maze::{Cell, Direction, Grid, Point};

/// Wilson's algorithm with walls in place of passages.
///
/// Starts from an open floor. Walks wander the even lattice where wall lines cross, and a walk
/// that reaches the perimeter or an existing wall is closed into a new wall branch. The walls form
/// a tree hanging off the perimeter, so the rooms between them form one too.
pub fn loop_erased_walls(grid: &mut Grid, rng: &mut StdRng) {
    open_arena(grid);

    let posts = (2..grid.rows() - 1)
        .step_by(2)
        .flat_map(|row| (2..grid.cols() - 1).step_by(2).map(move |col| Point::new(row, col)))
        .collect::<Vec<_>>();
    let mut cursor = 0;
    loop {
        while cursor < posts.len() && grid[posts[cursor]].contains(Cell::BUILDER) {
            cursor += 1;
        }
        let Some(&origin) = posts.get(cursor) else {
            break;
        };
        walk_into_walls(grid, origin, rng);
    }
}

/// The perimeter counts as built wall from the start.
fn is_built_wall(grid: &Grid, point: Point) -> bool {
    !grid.is_interior(point) || grid[point].contains(Cell::BUILDER)
}

fn walk_into_walls(grid: &mut Grid, origin: Point, rng: &mut StdRng) {
    grid.update(origin, |cell| {
        cell.insert(Cell::WALK);
        cell.set_backtrack(None);
    });
    let mut walk = origin;
    loop {
        let neighbors = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                walk.step(direction, 2)
                    .filter(|&next| grid.in_bounds(next))
                    .map(|next| (direction, next))
            })
            .collect::<Vec<_>>();
        let (direction, next) = neighbors[rng.random_range(0..neighbors.len())];

        if is_built_wall(grid, next) {
            grid.close(walk.midpoint(next));
            commit_wall(grid, walk);
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

/// Close every post of the walk ending at `tail` and the wall segments between them.
fn commit_wall(grid: &mut Grid, tail: Point) {
    let mut cur = tail;
    loop {
        let back = grid[cur].backtrack();
        grid.close(cur);
        grid.update(cur, |cell| {
            cell.remove(Cell::WALK);
            cell.set_backtrack(None);
            cell.insert(Cell::BUILDER);
        });
        match back.and_then(|back| grid.interior_step(cur, back, 2)) {
            Some(parent) => {
                grid.close(cur.midpoint(parent));
                cur = parent;
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::tests::assert_spanning_tree, maze::get_rng};

    #[test]
    fn test_loop_erased_walls_spanning_tree() {
        for seed in 0..5 {
            let mut grid = Grid::new(13, 17);
            loop_erased_walls(&mut grid, &mut get_rng(Some(seed)));
            assert_spanning_tree(&grid);
            // Every post where wall lines cross ends up closed
            for row in (2..12).step_by(2) {
                for col in (2..16).step_by(2) {
                    assert!(!grid.is_passable(Point::new(row, col)));
                }
            }
        }
    }

    #[test]
    fn test_commit_wall_closes_segments() {
        let mut grid = Grid::new(9, 9);
        open_arena(&mut grid);
        let origin = Point::new(2, 2);
        let tail = Point::new(2, 4);
        grid.update(origin, |cell| cell.insert(Cell::WALK));
        grid.update(tail, |cell| {
            cell.insert(Cell::WALK);
            cell.set_backtrack(Some(Direction::West));
        });
        commit_wall(&mut grid, tail);
        for col in 2..=4 {
            let p = Point::new(2, col);
            assert!(!grid.is_passable(p));
            assert!(!grid[p].contains(Cell::WALK));
        }
        assert!(grid[origin].contains(Cell::BUILDER));
        assert!(!grid.is_open_toward(Point::new(1, 3), Direction::South));
        assert!(grid.is_passable(Point::new(3, 3)));
    }
}
