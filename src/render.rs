//! Plain text rendering of a finished maze and its solve report.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
};

use crate::{
    maze::{Direction, Grid, Maze, Point},
    solvers::SolveReport,
};

/// Box-drawing wall pieces indexed by which neighbors are also walls,
/// `NORTH | SOUTH << 1 | EAST << 2 | WEST << 3`.
const WALL_GLYPHS: [&str; 16] = [
    "■", "╵", "╷", "│", "╶", "└", "┌", "├", "╴", "┘", "┐", "┤", "─", "┴", "┬", "┼",
];

/// Colors for every combination of the four agents' paint bits. Entry 0 is unused.
const PAINT_COLORS: [Color; 16] = [
    Color::Reset,
    Color::AnsiValue(1),
    Color::AnsiValue(2),
    Color::AnsiValue(3),
    Color::AnsiValue(4),
    Color::AnsiValue(5),
    Color::AnsiValue(6),
    Color::AnsiValue(7),
    Color::AnsiValue(8),
    Color::AnsiValue(9),
    Color::AnsiValue(10),
    Color::AnsiValue(11),
    Color::AnsiValue(12),
    Color::AnsiValue(13),
    Color::AnsiValue(14),
    Color::AnsiValue(15),
];

/// Width of each rendered cell, in character widths.
pub const CELL_WIDTH: usize = 1;

/// Which wall piece to draw at `point`, joining toward neighboring wall cells.
fn wall_glyph(grid: &Grid, point: Point) -> &'static str {
    let index = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ]
    .into_iter()
    .enumerate()
    .filter(|&(_, direction)| {
        point
            .step(direction, 1)
            .is_some_and(|next| grid.in_bounds(next) && !grid[next].is_passage())
    })
    .fold(0, |acc, (bit, _)| acc | (1 << bit));
    WALL_GLYPHS[index]
}

fn styled_cell(grid: &Grid, point: Point) -> style::StyledContent<&'static str> {
    let cell = grid[point];
    let styled = if cell.is_goal() {
        "F".with(Color::Cyan).attribute(Attribute::Bold)
    } else if cell.is_start() {
        "S".with(Color::Cyan).attribute(Attribute::Bold)
    } else if cell.paint() != 0 {
        "█".with(PAINT_COLORS[cell.paint() as usize])
    } else if cell.is_passage() {
        " ".with(Color::Reset)
    } else {
        wall_glyph(grid, point).with(Color::White)
    };

    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            styled.content().width(),
            CELL_WIDTH,
            "Each cell must occupy exactly one character width."
        );
    }

    styled
}

/// Queue the whole grid, one terminal line per row.
pub fn render_grid(out: &mut impl Write, grid: &Grid) -> std::io::Result<()> {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            queue!(out, style::PrintStyledContent(styled_cell(grid, Point::new(row, col))))?;
        }
        queue!(out, style::Print("\r\n"))?;
    }
    out.flush()
}

/// Queue the maze followed by a line per agent and the race result.
pub fn render_solution(
    out: &mut impl Write,
    maze: &Maze,
    report: &SolveReport,
) -> std::io::Result<()> {
    render_grid(out, maze.grid())?;
    for run in &report.runs {
        queue!(
            out,
            style::PrintStyledContent("█".with(PAINT_COLORS[1 << run.agent])),
            style::Print(format!(
                " agent {} from {}: {:?}, {} cells{}\r\n",
                run.agent,
                run.start,
                run.state,
                run.path.len(),
                if run.won { ", won" } else { "" }
            ))
        )?;
    }
    let config = maze.config();
    let summary = match report.winner {
        Some(winner) => format!("Agent {} won the race!", winner),
        None if report.winners().next().is_some() => {
            format!("{} agents found their goals.", report.winners().count())
        }
        None => "No agent reached a goal.".to_string(),
    };
    queue!(
        out,
        style::PrintStyledContent(summary.with(Color::Green).attribute(Attribute::Bold)),
        style::Print(format!(
            "\r\nMaze generated with {}\r\nMaze solved with {} ({})\r\n",
            config.generator, config.solver, config.game
        ))
    )?;
    out.flush()
}
