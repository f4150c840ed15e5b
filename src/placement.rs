//! Start and goal placement for each game.

use rand::{Rng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    maze::{Grid, Marker, Point},
    solvers::Game,
};

/// Random samples tried per marker before the maze is declared unusable.
pub const PLACEMENT_ATTEMPTS: usize = 19;

/// Where the markers ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// One start, or one per corner in race-from-corners, in corner scan order.
    pub starts: Vec<Point>,
    pub goals: Vec<Point>,
}

pub fn place_markers(grid: &mut Grid, game: Game, rng: &mut StdRng) -> Result<Placement> {
    let placement = match game {
        Game::Hunt | Game::Gather => {
            let start = pick_random_point(grid, rng)?;
            grid.place_marker(start, Marker::Start)?;
            let goals = (0..game.goal_count())
                .map(|_| {
                    let goal = pick_random_point(grid, rng)?;
                    grid.place_marker(goal, Marker::Goal)?;
                    Ok(goal)
                })
                .collect::<Result<Vec<_>>>()?;
            Placement {
                starts: vec![start],
                goals,
            }
        }
        Game::Corners => {
            let starts = (0..4)
                .map(|corner| {
                    let start = scan_from_corner(grid, corner)?;
                    grid.place_marker(start, Marker::Start)?;
                    Ok(start)
                })
                .collect::<Result<Vec<_>>>()?;
            let center = center_room(grid);
            if !grid.is_passable(center) {
                return Err(Error::CenterNotCarved { point: center });
            }
            grid.place_marker(center, Marker::Goal)?;
            Placement {
                starts,
                goals: vec![center],
            }
        }
    };
    tracing::debug!(
        "[placement] {:?}: starts {:?}, goals {:?}",
        game,
        placement.starts,
        placement.goals
    );
    Ok(placement)
}

/// Sample room cells until one is a passage without a marker.
fn pick_random_point(grid: &Grid, rng: &mut StdRng) -> Result<Point> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let choice = Point::new(
            2 * rng.random_range(0..(grid.rows() - 1) / 2) + 1,
            2 * rng.random_range(0..(grid.cols() - 1) / 2) + 1,
        );
        let cell = grid[choice];
        if cell.is_passage() && !cell.is_start() && !cell.is_goal() {
            return Ok(choice);
        }
    }
    tracing::warn!("[placement] gave up after {} attempts", PLACEMENT_ATTEMPTS);
    Err(Error::PlacementExhausted {
        attempts: PLACEMENT_ATTEMPTS,
    })
}

/// First passage met scanning row by row inward from a corner.
///
/// Corners are numbered top-left, top-right, bottom-left, bottom-right.
fn scan_from_corner(grid: &Grid, corner: usize) -> Result<Point> {
    let rows = 1..grid.rows() - 1;
    let cols = 1..grid.cols() - 1;
    let (from_bottom, from_right) = (corner >= 2, corner % 2 == 1);
    let row_order: Box<dyn Iterator<Item = usize>> = if from_bottom {
        Box::new(rows.rev())
    } else {
        Box::new(rows)
    };
    row_order
        .flat_map(|row| {
            let col_order: Box<dyn Iterator<Item = usize>> = if from_right {
                Box::new(cols.clone().rev())
            } else {
                Box::new(cols.clone())
            };
            col_order.map(move |col| Point::new(row, col))
        })
        .find(|&p| grid.is_passable(p))
        .ok_or(Error::NoCornerStart { corner })
}

/// The geometric center, nudged onto the room lattice.
pub fn center_room(grid: &Grid) -> Point {
    let snap = |n: usize| if n % 2 == 0 { n + 1 } else { n };
    Point::new(snap(grid.rows() / 2), snap(grid.cols() / 2))
}
