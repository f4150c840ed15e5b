//! Randomized maze generation and multi-agent concurrent solving.
//!
//! A [`Maze`] owns a packed cell [`Grid`](maze::Grid) built by one of the
//! [`Generator`]s. Solving dispatches up to four agent threads that race over the shared grid
//! under one lock, in one of three [`Game`]s.

pub mod error;
pub mod generators;
pub mod maze;
pub mod placement;
pub mod render;
pub mod solvers;

pub use error::{Error, Result};
pub use generators::Generator;
pub use maze::{Maze, MazeConfig, Modification, Point};
pub use solvers::{AgentRun, AgentState, Game, SolveReport, Solver};
