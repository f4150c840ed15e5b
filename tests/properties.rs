use std::collections::HashSet;

use racemaze::{
    AgentState, Error, Game, Generator, Maze, MazeConfig, Modification, Point, SolveReport,
    Solver,
    maze::{Cell, Direction, Grid},
};

const SOLVERS: [Solver; 3] = [Solver::Dfs, Solver::RandomizedDfs, Solver::Bfs];

fn maze(generator: Generator, game: Game, seed: u64) -> Maze {
    Maze::new(MazeConfig {
        rows: 21,
        cols: 31,
        generator,
        game,
        seed: Some(seed),
        ..MazeConfig::default()
    })
    .unwrap()
}

fn every_point(grid: &Grid) -> impl Iterator<Item = Point> + '_ {
    (0..grid.rows()).flat_map(move |row| (0..grid.cols()).map(move |col| Point::new(row, col)))
}

fn rooms_reachable_from(grid: &Grid, from: Point) -> HashSet<Point> {
    let mut seen = HashSet::from([from]);
    let mut stack = vec![from];
    while let Some(cur) = stack.pop() {
        for direction in Direction::ALL {
            if grid.is_open_toward(cur, direction) {
                if let Some(next) = cur.step(direction, 1) {
                    if seen.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
    }
    seen.into_iter().filter(|&p| grid.is_room(p)).collect()
}

fn assert_walls_consistent(grid: &Grid) {
    for p in every_point(grid) {
        if grid.is_boundary(p) {
            assert_eq!(grid[p], Cell::WALLED, "perimeter cell {p} was carved");
        }
        for direction in Direction::ALL {
            if let Some(q) = p.step(direction, 1).filter(|&q| grid.in_bounds(q)) {
                assert_eq!(
                    grid[p].has_wall(direction),
                    grid[q].has_wall(direction.opposite()),
                    "one-sided wall between {p} and {q}"
                );
            }
        }
    }
}

fn assert_path_walkable(grid: &Grid, path: &[Point]) {
    for pair in path.windows(2) {
        let direction = pair[0]
            .direction_to(pair[1])
            .unwrap_or_else(|| panic!("{} and {} are not adjacent", pair[0], pair[1]));
        assert!(grid.is_open_toward(pair[0], direction));
    }
}

fn assert_report_consistent(maze: &Maze, report: &SolveReport) {
    for run in &report.runs {
        assert_path_walkable(maze.grid(), &run.path);
        if let Some(&first) = run.path.first() {
            assert_eq!(first, run.start);
        }
        if run.won {
            assert_eq!(run.state, AgentState::FoundGoal);
            let last = run.path.last().copied().unwrap();
            assert!(maze.goals().contains(&last), "agent {} won off goal", run.agent);
        }
        assert_ne!(run.state, AgentState::Exploring);
    }
}

#[test]
fn walls_are_symmetric_for_every_generator() {
    for generator in Generator::ALL {
        for modification in [Modification::None, Modification::Cross, Modification::X] {
            let maze = Maze::new(MazeConfig {
                rows: 17,
                cols: 25,
                generator,
                modification,
                seed: Some(11),
                ..MazeConfig::default()
            })
            .unwrap();
            assert_walls_consistent(maze.grid());
        }
    }
}

#[test]
fn tree_builders_produce_perfect_mazes() {
    for generator in Generator::ALL.into_iter().filter(|g| g.is_spanning_tree()) {
        for seed in 0..4 {
            let maze = maze(generator, Game::Hunt, seed);
            let grid = maze.grid();
            let rooms = grid.rooms().count();
            assert_eq!(
                rooms_reachable_from(grid, Point::new(1, 1)).len(),
                rooms,
                "{generator} left rooms unreachable"
            );
            let joints = grid
                .rooms()
                .flat_map(|room| [Direction::South, Direction::East].map(|d| (room, d)))
                .filter(|&(room, d)| {
                    grid.is_open_toward(room, d)
                        && room.step(d, 1).is_some_and(|joint| grid.is_open_toward(joint, d))
                })
                .count();
            assert_eq!(joints, rooms - 1, "{generator} carved a loop");
        }
    }
}

#[test]
fn every_room_stays_reachable_with_modifications() {
    for generator in Generator::ALL {
        for modification in [Modification::None, Modification::Cross, Modification::X] {
            let maze = Maze::new(MazeConfig {
                rows: 23,
                cols: 41,
                generator,
                modification,
                seed: Some(5),
                ..MazeConfig::default()
            })
            .unwrap();
            let grid = maze.grid();
            assert_eq!(
                rooms_reachable_from(grid, maze.starts()[0]).len(),
                grid.rooms().count(),
                "{generator} with {modification}"
            );
        }
    }
}

#[test]
fn single_winner_games_have_exactly_one_winner() {
    for game in [Game::Hunt, Game::Corners] {
        for solver in SOLVERS {
            for generator in [Generator::RecurBacktrack, Generator::RecurDiv, Generator::Arena] {
                let mut maze = maze(generator, game, 21);
                let report = maze.solve_with(solver);
                assert_eq!(report.runs.len(), 4);
                let winners = report.winners().map(|run| run.agent).collect::<Vec<_>>();
                assert_eq!(winners.len(), 1, "{solver} {game} on {generator}");
                assert_eq!(report.winner, Some(winners[0]));
                assert_eq!(report.winning_path().and_then(|p| p.last()), maze.goals().first());
                assert_report_consistent(&maze, &report);
            }
        }
    }
}

#[test]
fn corners_agents_start_from_distinct_corners() {
    let mut maze = maze(Generator::Kruskal, Game::Corners, 8);
    let report = maze.solve();
    let starts = report.runs.iter().map(|run| run.start).collect::<HashSet<_>>();
    assert_eq!(starts.len(), 4);
    assert!(starts.iter().all(|start| maze.starts().contains(start)));
}

#[test]
fn gather_agents_claim_distinct_goals() {
    for solver in SOLVERS {
        let mut maze = maze(Generator::Prim, Game::Gather, 13);
        let report = maze.solve_with(solver);
        assert_eq!(report.winner, None);
        // Each agent sweeps the whole maze, so there is always a goal left for it
        assert_eq!(report.winners().count(), 4, "{solver}");
        let claimed = report
            .winners()
            .filter_map(|run| run.path.last().copied())
            .collect::<HashSet<_>>();
        assert_eq!(claimed.len(), 4);
        assert_report_consistent(&maze, &report);
    }
}

#[test]
fn lone_agent_solves_smallest_maze() {
    let mut maze = Maze::new(MazeConfig {
        rows: 7,
        cols: 7,
        agents: 1,
        seed: Some(3),
        ..MazeConfig::default()
    })
    .unwrap();
    let report = maze.solve();
    assert_eq!(report.runs.len(), 1);
    assert_eq!(report.winner, Some(0));
    let run = &report.runs[0];
    assert_eq!(run.state, AgentState::FoundGoal);
    assert_eq!(run.path.first(), maze.starts().first());
    assert_eq!(run.path.last(), maze.goals().first());
    assert!(run.path.iter().all(|&p| maze.grid()[p].is_painted_by(0)));
    assert_report_consistent(&maze, &report);
}

#[test]
fn clearing_paths_allows_another_solve() {
    let mut maze = maze(Generator::LoopErased, Game::Hunt, 4);
    maze.solve_with(Solver::Bfs);
    assert!(maze.grid().cells().iter().any(|cell| cell.paint() != 0));
    maze.clear_paths();
    assert!(
        maze.grid()
            .cells()
            .iter()
            .all(|cell| !cell.intersects(Cell::SEEN_MASK | Cell::PAINT_MASK))
    );
    let report = maze.solve_with(Solver::Dfs);
    assert!(report.winner.is_some());
}

#[test]
fn same_seed_builds_same_maze() {
    for generator in Generator::ALL {
        let a = maze(generator, Game::Gather, 99);
        let b = maze(generator, Game::Gather, 99);
        assert_eq!(a.grid().cells(), b.grid().cells());
        assert_eq!(a.starts(), b.starts());
        assert_eq!(a.goals(), b.goals());
    }
}

#[test]
fn rejects_bad_configuration() {
    let small = MazeConfig {
        rows: 4,
        cols: 40,
        ..MazeConfig::default()
    };
    assert!(matches!(
        Maze::new(small),
        Err(Error::InvalidDimensions { rows: 4, cols: 40 })
    ));
    let crowded = MazeConfig {
        agents: 5,
        ..MazeConfig::default()
    };
    assert!(matches!(Maze::new(crowded), Err(Error::InvalidAgentCount(5))));
    let even = Maze::new(MazeConfig {
        rows: 10,
        cols: 12,
        seed: Some(1),
        ..MazeConfig::default()
    })
    .unwrap();
    assert_eq!((even.rows(), even.cols()), (11, 13));
}
