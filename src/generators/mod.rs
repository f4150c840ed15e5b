use rand::{Rng, rngs::StdRng};

mod arena;
mod grid_runs;
mod kruskal;
mod loop_erased;
mod loop_erased_walls;
mod prim;
mod recur_backtrack;
mod recur_div;

use arena::open_arena;
use grid_runs::randomized_grid_runs;
use kruskal::randomized_kruskal;
use loop_erased::loop_erased_walk;
use loop_erased_walls::loop_erased_walls;
use prim::randomized_prim;
use recur_backtrack::recursive_backtrack;
use recur_div::recursive_division;

use crate::{
    error::{Error, Result},
    maze::{Cell, Direction, Grid, Point},
};

/// Maze construction algorithms.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Depth-first carving that backtracks through marks left in the cells.
    #[default]
    RecurBacktrack,
    /// Wilson's algorithm.
    LoopErased,
    /// Wilson's algorithm run on the wall lattice of an open floor, adding walls.
    LoopErasedWalls,
    /// Recursive subdivision. May leave cycles.
    RecurDiv,
    /// Depth-first carving in straight runs that may cross built rooms. May leave cycles.
    GridRuns,
    /// Minimum-weight frontier growth.
    Prim,
    /// Random edges joined through a disjoint set.
    Kruskal,
    /// A single open floor. Not a spanning tree.
    Arena,
}

impl Generator {
    pub const ALL: [Generator; 8] = [
        Generator::RecurBacktrack,
        Generator::LoopErased,
        Generator::LoopErasedWalls,
        Generator::RecurDiv,
        Generator::GridRuns,
        Generator::Prim,
        Generator::Kruskal,
        Generator::Arena,
    ];

    /// True if the builder leaves exactly one simple path between any two room cells.
    pub fn is_spanning_tree(self) -> bool {
        !matches!(
            self,
            Generator::RecurDiv | Generator::GridRuns | Generator::Arena
        )
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Randomized Depth First Search"),
            Generator::LoopErased => write!(f, "Loop-Erased Random Walks"),
            Generator::LoopErasedWalls => write!(f, "Loop-Erased Random Wall Walks"),
            Generator::RecurDiv => write!(f, "Randomized Recursive Subdivision"),
            Generator::GridRuns => write!(f, "Randomized Grid Runs"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Arena => write!(f, "Arena"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rdfs" => Ok(Generator::RecurBacktrack),
            "wilson" => Ok(Generator::LoopErased),
            "wilson-walls" => Ok(Generator::LoopErasedWalls),
            "fractal" => Ok(Generator::RecurDiv),
            "grid" => Ok(Generator::GridRuns),
            "prim" => Ok(Generator::Prim),
            "kruskal" => Ok(Generator::Kruskal),
            "arena" => Ok(Generator::Arena),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Pick a uniformly random room cell.
fn random_room(grid: &Grid, rng: &mut StdRng) -> Point {
    let row = 2 * rng.random_range(0..(grid.rows() - 1) / 2) + 1;
    let col = 2 * rng.random_range(0..(grid.cols() - 1) / 2) + 1;
    Point::new(row, col)
}

/// Room two steps away in `direction` that the builder has not incorporated yet.
fn unbuilt_room(grid: &Grid, from: Point, direction: Direction) -> Option<Point> {
    grid.interior_step(from, direction, 2)
        .filter(|&next| !grid[next].contains(Cell::BUILDER))
}

/// Build a maze into `grid`, which must be freshly reset. Builder bookkeeping is cleared
/// before returning.
pub fn generate_maze(grid: &mut Grid, generator: Generator, rng: &mut StdRng) {
    match generator {
        Generator::RecurBacktrack => recursive_backtrack(grid, rng),
        Generator::LoopErased => loop_erased_walk(grid, rng),
        Generator::LoopErasedWalls => loop_erased_walls(grid, rng),
        Generator::RecurDiv => recursive_division(grid, rng),
        Generator::GridRuns => randomized_grid_runs(grid, rng),
        Generator::Prim => randomized_prim(grid, rng),
        Generator::Kruskal => randomized_kruskal(grid, rng),
        Generator::Arena => open_arena(grid),
    }
    grid.clear_builder_marks();
    tracing::debug!(
        "[generate] {} carved {} passage cells",
        generator,
        grid.cells().iter().filter(|cell| cell.is_passage()).count()
    );
}
