use rand::{Rng, rngs::StdRng};

use crate::maze::{Grid, Orientation, Point};

/// A rectangular region still waiting to be divided, in grid coordinates including its border.
#[derive(Debug, Clone, Copy)]
struct Chamber {
    offset: Point,
    height: usize,
    width: usize,
}

/// Wall lines fall on even offsets so they never cover a room.
fn choose_division(axis_limit: usize, rng: &mut StdRng) -> usize {
    let mut divide = rng.random_range(1..=axis_limit - 2);
    if divide % 2 != 0 {
        divide += 1;
    }
    if divide >= axis_limit - 1 {
        divide -= 2;
    }
    divide
}

/// Passages fall on odd offsets so they always open between two rooms.
fn choose_passage(axis_limit: usize, rng: &mut StdRng) -> usize {
    let mut passage = rng.random_range(1..=axis_limit - 2);
    if passage % 2 == 0 {
        passage += 1;
    }
    if passage >= axis_limit - 1 {
        passage -= 2;
    }
    passage
}

/// Recursive subdivision, driven by an explicit chamber stack.
///
/// Starts from an open floor and draws walls. Each wall keeps one passage, so every room stays
/// reachable.
pub fn recursive_division(grid: &mut Grid, rng: &mut StdRng) {
    for row in 1..grid.rows() - 1 {
        for col in 1..grid.cols() - 1 {
            grid.open(Point::new(row, col));
        }
    }

    let mut chambers = vec![Chamber {
        offset: Point::new(0, 0),
        height: grid.rows(),
        width: grid.cols(),
    }];

    while let Some(Chamber {
        offset,
        height,
        width,
    }) = chambers.pop()
    {
        // A chamber one room thick has no interior cells to wall off.
        if height <= 3 || width <= 3 {
            continue;
        }

        let orientation = match height.cmp(&width) {
            std::cmp::Ordering::Greater => Orientation::Horizontal,
            std::cmp::Ordering::Less => Orientation::Vertical,
            std::cmp::Ordering::Equal => {
                if rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                }
            }
        };

        match orientation {
            Orientation::Horizontal => {
                let divide = choose_division(height, rng);
                let passage = choose_passage(width, rng);
                let row = offset.row + divide;
                (0..width)
                    .filter(|&col| col != passage)
                    .for_each(|col| grid.close(Point::new(row, offset.col + col)));

                chambers.push(Chamber {
                    offset,
                    height: divide + 1,
                    width,
                });
                chambers.push(Chamber {
                    offset: Point::new(row, offset.col),
                    height: height - divide,
                    width,
                });
            }
            Orientation::Vertical => {
                let divide = choose_division(width, rng);
                let passage = choose_passage(height, rng);
                let col = offset.col + divide;
                (0..height)
                    .filter(|&row| row != passage)
                    .for_each(|row| grid.close(Point::new(offset.row + row, col)));

                chambers.push(Chamber {
                    offset,
                    height,
                    width: divide + 1,
                });
                chambers.push(Chamber {
                    offset: Point::new(offset.row, col),
                    height,
                    width: width - divide,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::tests::reachable_rooms,
        maze::{Cell, get_rng},
    };

    #[test]
    fn test_division_and_passage_parity() {
        let mut rng = get_rng(Some(9));
        for limit in [5, 7, 9, 21, 111] {
            for _ in 0..50 {
                let divide = choose_division(limit, &mut rng);
                assert_eq!(divide % 2, 0);
                assert!((2..=limit - 3).contains(&divide));
                let passage = choose_passage(limit, &mut rng);
                assert_eq!(passage % 2, 1);
                assert!((1..=limit - 2).contains(&passage));
            }
        }
    }

    #[test]
    fn test_recursive_division_connected() {
        for seed in 0..5 {
            let mut grid = Grid::new(17, 23);
            recursive_division(&mut grid, &mut get_rng(Some(seed)));
            assert_eq!(reachable_rooms(&grid), grid.rooms().count());
            // Some walls were drawn
            assert!(
                (1..16)
                    .flat_map(|row| (1..22).map(move |col| Point::new(row, col)))
                    .any(|p| grid[p] == Cell::WALLED)
            );
        }
    }
}
