use std::{cmp::Reverse, collections::BinaryHeap, collections::HashMap};

use rand::{Rng, rngs::StdRng};

use super::{random_room, unbuilt_room};
use crate::maze::{Cell, Direction, Grid, Point};

/// Upper bound, inclusive, for the random weight given to each room.
const MAX_WEIGHT: u32 = 100;

/// Minimum-frontier growth.
///
/// Every room gets a random weight once. The lightest frontier room grows toward its lightest
/// unbuilt neighbor, and leaves the frontier once it has none.
pub fn randomized_prim(grid: &mut Grid, rng: &mut StdRng) {
    let weights = grid
        .rooms()
        .map(|room| (room, rng.random_range(0..=MAX_WEIGHT)))
        .collect::<HashMap<Point, u32>>();

    let start = random_room(grid, rng);
    grid.update(start, |cell| cell.insert(Cell::PASSAGE | Cell::BUILDER));

    // Using Reverse to turn the max-heap into a min-heap
    let mut frontier: BinaryHeap<Reverse<(u32, Point)>> = BinaryHeap::new();
    frontier.push(Reverse((weights[&start], start)));

    while let Some(&Reverse((_, cur))) = frontier.peek() {
        let lightest = Direction::ALL
            .into_iter()
            .filter_map(|direction| unbuilt_room(grid, cur, direction))
            .min_by_key(|next| weights[next]);

        match lightest {
            Some(next) => {
                grid.join_rooms(cur, next);
                grid.update(next, |cell| cell.insert(Cell::BUILDER));
                frontier.push(Reverse((weights[&next], next)));
            }
            None => {
                frontier.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::tests::assert_spanning_tree, maze::get_rng};

    #[test]
    fn test_randomized_prim_spanning_tree() {
        for seed in 0..5 {
            let mut grid = Grid::new(15, 15);
            randomized_prim(&mut grid, &mut get_rng(Some(seed)));
            assert_spanning_tree(&grid);
        }
    }

    #[test]
    fn test_randomized_prim_minimum_size() {
        let mut grid = Grid::new(7, 7);
        randomized_prim(&mut grid, &mut get_rng(Some(0)));
        assert_spanning_tree(&grid);
        // The perimeter is never carved
        assert!(!grid.is_passable(Point::new(0, 1)));
        assert!(!grid.is_passable(Point::new(3, 6)));
    }
}
