use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

mod bfs;
mod dfs;

use bfs::solve_bfs;
use dfs::solve_dfs;

use crate::{
    error::{Error, Result},
    maze::{Cell, Direction, Grid, Maze, Point},
};

/// Search strategy every agent runs.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    #[default]
    Dfs,
    RandomizedDfs,
    Bfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth First Search"),
            Solver::RandomizedDfs => write!(f, "Randomized Depth First Search"),
            Solver::Bfs => write!(f, "Breadth First Search"),
        }
    }
}

impl std::str::FromStr for Solver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dfs" => Ok(Solver::Dfs),
            "rdfs" => Ok(Solver::RandomizedDfs),
            "bfs" => Ok(Solver::Bfs),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// How the agents compete.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    /// All agents share one start and race to a single goal.
    #[default]
    Hunt,
    /// All agents share one start and each claims a different one of four goals.
    Gather,
    /// Each agent starts in a corner and races to the center.
    Corners,
}

impl Game {
    pub fn goal_count(self) -> usize {
        match self {
            Game::Hunt | Game::Corners => 1,
            Game::Gather => 4,
        }
    }

    /// True if only one agent may win.
    pub fn has_single_winner(self) -> bool {
        !matches!(self, Game::Gather)
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Game::Hunt => write!(f, "Race to one goal"),
            Game::Gather => write!(f, "Race to distinct goals"),
            Game::Corners => write!(f, "Race from the corners"),
        }
    }
}

impl std::str::FromStr for Game {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hunt" => Ok(Game::Hunt),
            "gather" => Ok(Game::Gather),
            "corners" => Ok(Game::Corners),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Exploring,
    /// The agent stood on a goal cell. Whether it won is recorded separately.
    FoundGoal,
    /// The frontier drained without reaching a usable goal.
    Exhausted,
    /// Another agent won the race before this one reached a goal.
    Stopped,
}

/// What one agent did during a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRun {
    pub agent: usize,
    pub start: Point,
    pub state: AgentState,
    /// Claimed the race in hunt and corners, or claimed an unclaimed goal in gather.
    pub won: bool,
    /// Ordered from the start to the cell where the agent stopped.
    pub path: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// The agent that claimed the shared race slot. Always `None` in gather.
    pub winner: Option<usize>,
    pub runs: Vec<AgentRun>,
}

impl SolveReport {
    pub fn winners(&self) -> impl Iterator<Item = &AgentRun> {
        self.runs.iter().filter(|run| run.won)
    }

    pub fn winning_path(&self) -> Option<&[Point]> {
        self.winner
            .and_then(|winner| self.runs.iter().find(|run| run.agent == winner))
            .map(|run| run.path.as_slice())
    }
}

/// The shared winner slot. Set at most once per solve.
pub struct RaceOutcome {
    winner: AtomicUsize,
}

impl RaceOutcome {
    const NO_WINNER: usize = usize::MAX;

    pub fn new() -> Self {
        Self {
            winner: AtomicUsize::new(Self::NO_WINNER),
        }
    }

    /// Attempt to become the winner. Only the first claim succeeds.
    pub fn claim(&self, agent: usize) -> bool {
        self.winner
            .compare_exchange(Self::NO_WINNER, agent, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Lock-free early-exit hint. A stale read only delays an agent's exit.
    pub fn is_decided(&self) -> bool {
        self.winner.load(Ordering::Relaxed) != Self::NO_WINNER
    }

    pub fn winner(&self) -> Option<usize> {
        match self.winner.load(Ordering::Acquire) {
            Self::NO_WINNER => None,
            agent => Some(agent),
        }
    }
}

impl Default for RaceOutcome {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of stepping onto a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    Explore,
    Goal { won: bool },
}

/// One racing worker's view of the shared solve.
struct Agent<'a> {
    index: usize,
    start: Point,
    game: Game,
    grid: &'a Mutex<Grid>,
    outcome: &'a RaceOutcome,
}

impl Agent<'_> {
    fn lock(&self) -> MutexGuard<'_, Grid> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn seen_bit(&self) -> u32 {
        Cell::seen_bit(self.index)
    }

    fn paint_bit(&self) -> u32 {
        Cell::paint_bit(self.index)
    }

    /// Each agent tries the direction it was dispatched in first, spreading the agents out.
    fn biased_directions(&self) -> [Direction; 4] {
        std::array::from_fn(|k| Direction::CLOCKWISE[(self.index + k) % 4])
    }

    /// Only the single-winner games end early once the race is decided.
    fn race_decided(&self) -> bool {
        self.game.has_single_winner() && self.outcome.is_decided()
    }

    /// Check the cell for a goal and, if the agent keeps going, set `marks` on it.
    ///
    /// In gather, checking for an unclaimed goal and claiming it happen under one lock.
    fn arrive(&self, cur: Point, marks: u32) -> Arrival {
        let mut grid = self.lock();
        let cell = grid[cur];
        if cell.is_goal() {
            match self.game {
                Game::Hunt | Game::Corners => {
                    drop(grid);
                    return Arrival::Goal {
                        won: self.outcome.claim(self.index),
                    };
                }
                Game::Gather if !cell.intersects(Cell::SEEN_MASK) => {
                    let seen = self.seen_bit();
                    grid.update(cur, |cell| cell.insert(seen));
                    return Arrival::Goal { won: true };
                }
                // Another agent got here first. Treat it as ordinary ground.
                Game::Gather => {}
            }
        }
        grid.update(cur, |cell| cell.insert(marks));
        Arrival::Explore
    }

    /// Neighbor through an open side that carries none of the `skip` bits.
    fn open_neighbor(&self, cur: Point, direction: Direction, skip: u32) -> Option<Point> {
        let grid = self.lock();
        if !grid.is_open_toward(cur, direction) {
            return None;
        }
        cur.step(direction, 1)
            .filter(|&next| !grid[next].intersects(skip))
    }

    fn paint_path(&self, path: &[Point]) {
        let paint = self.paint_bit();
        for &p in path {
            self.lock().update(p, |cell| cell.insert(paint));
        }
    }

    fn finish(&self, state: AgentState, won: bool, path: Vec<Point>) -> AgentRun {
        let state = match state {
            AgentState::Exploring => AgentState::Exhausted,
            other => other,
        };
        tracing::debug!(
            "[agent {}] {:?} won={} path length {}",
            self.index,
            state,
            won,
            path.len()
        );
        AgentRun {
            agent: self.index,
            start: self.start,
            state,
            won,
            path,
        }
    }
}

/// Race the maze's agents with `solver` and block until every agent has finished.
///
/// The grid is moved behind a mutex for the duration of the solve and handed back afterwards.
pub fn solve_maze(maze: &mut Maze, solver: Solver) -> SolveReport {
    maze.clear_paths();
    let game = maze.config().game;
    let agents = maze.config().agents;

    let starts = match game {
        Game::Corners => {
            let mut corners = maze.starts().to_vec();
            corners.shuffle(maze.rng_mut());
            corners.truncate(agents);
            corners
        }
        Game::Hunt | Game::Gather => vec![maze.starts()[0]; agents],
    };
    let seeds = (0..starts.len())
        .map(|_| maze.rng_mut().random::<u64>())
        .collect::<Vec<_>>();

    tracing::info!(
        "[solve] {} agents, {}, {}",
        starts.len(),
        solver,
        game
    );

    let grid = Mutex::new(std::mem::take(&mut maze.grid));
    let outcome = RaceOutcome::new();

    let runs = std::thread::scope(|s| {
        let handles = starts
            .iter()
            .zip(seeds)
            .enumerate()
            .map(|(index, (&start, seed))| {
                let agent = Agent {
                    index,
                    start,
                    game,
                    grid: &grid,
                    outcome: &outcome,
                };
                s.spawn(move || match solver {
                    Solver::Dfs => solve_dfs(&agent, None),
                    Solver::RandomizedDfs => {
                        solve_dfs(&agent, Some(StdRng::seed_from_u64(seed)))
                    }
                    Solver::Bfs => solve_bfs(&agent),
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect::<Vec<_>>()
    });

    maze.grid = grid.into_inner().unwrap_or_else(PoisonError::into_inner);
    let report = SolveReport {
        winner: outcome.winner(),
        runs,
    };

    if solver == Solver::Bfs {
        highlight_bfs_result(&mut maze.grid, game, &report);
    }

    match report.winner {
        Some(winner) => tracing::info!("[solve] agent {} won", winner),
        None => tracing::info!("[solve] {} agents claimed a goal", report.winners().count()),
    }
    report
}

/// Breadth-first agents paint everything they expand. Replace that wash with the result: the
/// winner's path in single-winner games, or each claimed goal in gather.
fn highlight_bfs_result(grid: &mut Grid, game: Game, report: &SolveReport) {
    let recolor = |grid: &mut Grid, p: Point, agent: usize| {
        grid.update(p, |cell| {
            cell.remove(Cell::PAINT_MASK);
            cell.insert(Cell::paint_bit(agent));
        })
    };
    if game.has_single_winner() {
        if let Some(winner) = report.winner {
            for &p in report.winning_path().unwrap_or_default() {
                recolor(grid, p, winner);
            }
        }
    } else {
        for run in report.winners() {
            if let Some(&goal) = run.path.last() {
                recolor(grid, goal, run.agent);
            }
        }
    }
}
