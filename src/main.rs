use std::process::ExitCode;

use racemaze::{Error, Maze, MazeConfig, render::render_solution};
use tracing_appender::non_blocking::WorkerGuard;

/// Log to a file so tracing output never interleaves with the rendered maze.
fn init_tracing() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "racemaze.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    guard
}

/// Positional arguments: rows cols generator solver game modification. All optional.
fn parse_config(mut args: impl Iterator<Item = String>) -> racemaze::Result<MazeConfig> {
    let mut config = MazeConfig::default();
    let parse_dimension = |arg: String| {
        arg.parse::<usize>()
            .map_err(|_| Error::InvalidArgument(arg))
    };
    if let Some(arg) = args.next() {
        config.rows = parse_dimension(arg)?;
    }
    if let Some(arg) = args.next() {
        config.cols = parse_dimension(arg)?;
    }
    if let Some(arg) = args.next() {
        config.generator = arg.parse()?;
    }
    if let Some(arg) = args.next() {
        config.solver = arg.parse()?;
    }
    if let Some(arg) = args.next() {
        config.game = arg.parse()?;
    }
    if let Some(arg) = args.next() {
        config.modification = arg.parse()?;
    }
    Ok(config)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_config(std::env::args().skip(1))?;
    let mut maze = Maze::new(config)?;
    let report = maze.solve();
    render_solution(&mut std::io::stdout(), &maze, &report)?;
    Ok(())
}

fn main() -> ExitCode {
    let _guard = init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("racemaze: {}", err);
            eprintln!(
                "usage: racemaze [rows] [cols] [rdfs|wilson|wilson-walls|fractal|grid|prim|kruskal|arena] \
                 [dfs|rdfs|bfs] [hunt|gather|corners] [none|cross|x]"
            );
            ExitCode::FAILURE
        }
    }
}
