use rand::{rngs::StdRng, seq::SliceRandom};

use super::{random_room, unbuilt_room};
use crate::maze::{Cell, Direction, Grid, Point};

/// Rooms carved per run before a new direction is drawn. Shorter runs converge on plain
/// depth-first carving, longer runs make longer straights.
const RUN_LIMIT: usize = 4;

/// Randomized depth-first carving that keeps running straight once a direction is chosen.
///
/// A direction is only chosen toward an unbuilt room, but the run itself continues over rooms
/// already in the maze until the perimeter or the run limit. Crossing built rooms closes cycles
/// and gives the grid texture.
pub fn randomized_grid_runs(grid: &mut Grid, rng: &mut StdRng) {
    let start = random_room(grid, rng);
    grid.update(start, |cell| cell.insert(Cell::PASSAGE | Cell::BUILDER));

    let mut stack = vec![start];
    let mut directions = Direction::ALL;
    // Don't pop yet, the top of the stack may still have branches
    while let Some(&cur) = stack.last() {
        directions.shuffle(rng);
        match directions
            .iter()
            .copied()
            .find(|&direction| unbuilt_room(grid, cur, direction).is_some())
        {
            Some(direction) => complete_run(grid, &mut stack, cur, direction),
            None => {
                stack.pop();
            }
        }
    }
}

fn complete_run(grid: &mut Grid, stack: &mut Vec<Point>, mut cur: Point, direction: Direction) {
    for _ in 0..RUN_LIMIT {
        let Some(next) = grid.interior_step(cur, direction, 2) else {
            break;
        };
        grid.join_rooms(cur, next);
        grid.update(next, |cell| cell.insert(Cell::BUILDER));
        // Every room of the run goes on the stack so backtracking can branch from it later
        stack.push(next);
        cur = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::tests::{reachable_rooms, room_edges},
        maze::get_rng,
    };

    #[test]
    fn test_grid_runs_reach_every_room() {
        for seed in 0..5 {
            let mut grid = Grid::new(19, 25);
            randomized_grid_runs(&mut grid, &mut get_rng(Some(seed)));
            let rooms = grid.rooms().count();
            assert!(grid.rooms().all(|room| grid.is_passable(room)));
            assert_eq!(reachable_rooms(&grid), rooms);
            assert!(room_edges(&grid) >= rooms - 1);
        }
    }

    #[test]
    fn test_run_crosses_built_rooms() {
        let mut grid = Grid::new(3, 23);
        for room in [Point::new(1, 1), Point::new(1, 5)] {
            grid.update(room, |cell| cell.insert(Cell::PASSAGE | Cell::BUILDER));
        }
        let mut stack = vec![Point::new(1, 1)];
        complete_run(&mut grid, &mut stack, Point::new(1, 1), Direction::East);
        assert_eq!(
            stack,
            vec![
                Point::new(1, 1),
                Point::new(1, 3),
                Point::new(1, 5),
                Point::new(1, 7),
                Point::new(1, 9)
            ]
        );
        assert!((1..=9).all(|col| grid.is_passable(Point::new(1, col))));
        assert!(grid.is_open_toward(Point::new(1, 4), Direction::East));
    }

    #[test]
    fn test_run_stops_at_perimeter() {
        let mut grid = Grid::new(3, 7);
        grid.update(Point::new(1, 1), |cell| cell.insert(Cell::PASSAGE | Cell::BUILDER));
        let mut stack = vec![Point::new(1, 1)];
        complete_run(&mut grid, &mut stack, Point::new(1, 1), Direction::East);
        assert_eq!(stack, vec![Point::new(1, 1), Point::new(1, 3), Point::new(1, 5)]);
        assert_eq!(grid[Point::new(1, 6)], Cell::WALLED);
    }

    #[test]
    fn test_run_stops_at_limit() {
        let mut grid = Grid::new(3, 23);
        let mut stack = vec![Point::new(1, 1)];
        grid.update(Point::new(1, 1), |cell| cell.insert(Cell::PASSAGE | Cell::BUILDER));
        complete_run(&mut grid, &mut stack, Point::new(1, 1), Direction::East);
        assert_eq!(stack.len(), RUN_LIMIT + 1);
        assert_eq!(stack.last(), Some(&Point::new(1, 1 + 2 * RUN_LIMIT)));
        assert!(!grid.is_passable(Point::new(1, 2 + 2 * RUN_LIMIT)));
    }
}
