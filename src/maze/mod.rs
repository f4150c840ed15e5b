pub mod cell;
pub mod grid;

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};

pub use cell::{Cell, MAX_AGENTS};
pub use grid::{Grid, Marker};

use crate::{
    error::{Error, Result},
    generators::{Generator, generate_maze},
    placement::place_markers,
    solvers::{Game, SolveReport, Solver, solve_maze},
};

/// Smallest extent, in cells, along either axis.
pub const MIN_DIMENSION: usize = 7;

/// A (row, column) position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Point { row, col }
    }

    /// The point `distance` cells away in `direction`, or `None` on underflow.
    pub fn step(self, direction: Direction, distance: usize) -> Option<Point> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr * distance as isize)?;
        let col = self.col.checked_add_signed(dc * distance as isize)?;
        Some(Point { row, col })
    }

    /// Direction from `self` to an orthogonally adjacent `other`.
    pub fn direction_to(self, other: Point) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.step(direction, 1) == Some(other))
    }

    /// The cell halfway between two points two steps apart on the same axis.
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Dispatch order for agents. Agent `i` tries `CLOCKWISE[i]` first.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn wall_bit(self) -> u32 {
        match self {
            Direction::North => Cell::NORTH_WALL,
            Direction::South => Cell::SOUTH_WALL,
            Direction::East => Cell::EAST_WALL,
            Direction::West => Cell::WEST_WALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Extra shortcut passages carved after generation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modification {
    #[default]
    None,
    /// Crossroads along the middle row and middle column.
    Cross,
    /// Two diagonals crossing at the center.
    X,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::None => write!(f, "No modification"),
            Modification::Cross => write!(f, "Center crossroads"),
            Modification::X => write!(f, "Diagonal X"),
        }
    }
}

impl std::str::FromStr for Modification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Modification::None),
            "cross" => Ok(Modification::Cross),
            "x" => Ok(Modification::X),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Everything needed to build and solve one maze.
#[derive(Debug, Clone)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub generator: Generator,
    pub modification: Modification,
    pub game: Game,
    pub solver: Solver,
    /// Number of racing agents, at most [`MAX_AGENTS`].
    pub agents: usize,
    /// Fixed seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 31,
            cols: 111,
            generator: Generator::RecurBacktrack,
            modification: Modification::None,
            game: Game::Hunt,
            solver: Solver::Dfs,
            agents: MAX_AGENTS,
            seed: None,
        }
    }
}

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Round an extent up to the next odd value and reject anything below [`MIN_DIMENSION`].
fn odd_dimensions(rows: usize, cols: usize) -> Result<(usize, usize)> {
    let round = |n: usize| if n % 2 == 0 { n + 1 } else { n };
    let (odd_rows, odd_cols) = (round(rows), round(cols));
    if odd_rows < MIN_DIMENSION || odd_cols < MIN_DIMENSION {
        return Err(Error::InvalidDimensions { rows, cols });
    }
    Ok((odd_rows, odd_cols))
}

pub struct Maze {
    pub(crate) grid: Grid,
    config: MazeConfig,
    rng: StdRng,
    starts: Vec<Point>,
    goals: Vec<Point>,
}

impl Maze {
    /// Validates the configuration, then generates the maze and places its markers.
    pub fn new(config: MazeConfig) -> Result<Self> {
        let (rows, cols) = odd_dimensions(config.rows, config.cols)?;
        if config.agents == 0 || config.agents > MAX_AGENTS {
            return Err(Error::InvalidAgentCount(config.agents));
        }
        let config = MazeConfig { rows, cols, ..config };
        let mut maze = Maze {
            grid: Grid::new(rows, cols),
            rng: get_rng(config.seed),
            config,
            starts: Vec::new(),
            goals: Vec::new(),
        };
        maze.build()?;
        Ok(maze)
    }

    fn build(&mut self) -> Result<()> {
        tracing::info!(
            "[generate] {} on {}x{} grid, {}",
            self.config.generator,
            self.config.rows,
            self.config.cols,
            self.config.modification
        );
        generate_maze(&mut self.grid, self.config.generator, &mut self.rng);
        apply_modification(&mut self.grid, self.config.modification);
        let placement = place_markers(&mut self.grid, self.config.game, &mut self.rng)?;
        self.starts = placement.starts;
        self.goals = placement.goals;
        Ok(())
    }

    /// Wall every cell and forget the markers, so a failed rebuild leaves no stale points.
    fn reset(&mut self) {
        self.grid.reset();
        self.starts.clear();
        self.goals.clear();
    }

    /// Discard the current maze and generate a fresh one with a reseeded random source.
    pub fn regenerate(&mut self) -> Result<()> {
        self.rng = get_rng(None);
        self.reset();
        self.build()
    }

    /// Regenerate with a new builder, game, and dimensions. The allocation is reused when
    /// the rounded dimensions are unchanged.
    pub fn regenerate_with(
        &mut self,
        generator: Generator,
        game: Game,
        rows: usize,
        cols: usize,
    ) -> Result<()> {
        let (rows, cols) = odd_dimensions(rows, cols)?;
        self.config.generator = generator;
        self.config.game = game;
        if rows != self.grid.rows() || cols != self.grid.cols() {
            self.grid = Grid::new(rows, cols);
            self.config.rows = rows;
            self.config.cols = cols;
        }
        self.regenerate()
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// The single start, or the four corner starts in race-from-corners.
    pub fn starts(&self) -> &[Point] {
        &self.starts
    }

    pub fn goals(&self) -> &[Point] {
        &self.goals
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Reset per-agent seen and paint bits so the maze can be solved again.
    pub fn clear_paths(&mut self) {
        self.grid.clear_agent_marks();
    }

    /// Race the configured agents using the configured strategy and game.
    pub fn solve(&mut self) -> SolveReport {
        let solver = self.config.solver;
        self.solve_with(solver)
    }

    pub fn solve_with(&mut self, solver: Solver) -> SolveReport {
        solve_maze(self, solver)
    }
}

/// Carve the configured shortcut passages. Only interior cells are touched.
pub fn apply_modification(grid: &mut Grid, modification: Modification) {
    let (rows, cols) = (grid.rows(), grid.cols());
    match modification {
        Modification::None => {}
        Modification::Cross => {
            let (mid_row, mid_col) = (rows / 2, cols / 2);
            for col in 2..cols - 2 {
                grid.open(Point::new(mid_row, col));
                grid.open(Point::new(mid_row + 1, col));
            }
            for row in 2..rows - 2 {
                grid.open(Point::new(row, mid_col));
                grid.open(Point::new(row, mid_col + 1));
            }
        }
        Modification::X => {
            // Diagonals run from (2, 2) to (rows - 3, cols - 3) and mirrored, widened by two
            // columns each side so they cut every wall line they cross.
            let span_rows = rows - 5;
            let span_cols = cols - 5;
            for row in 2..=rows - 3 {
                let col = 2 + (row - 2) * span_cols / span_rows;
                for on_line in [col, cols - 1 - col] {
                    let low = on_line.saturating_sub(2).max(2);
                    let high = (on_line + 2).min(cols - 3);
                    for c in low..=high {
                        grid.open(Point::new(row, c));
                    }
                }
            }
        }
    }
}
