//! CLI for maze generation

use clap::Parser;
use log::info;
use maze_runner::{Level, MazeGenerator};

/// Perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Difficulty, sets the maze size
    #[arg(short, long, value_enum, default_value_t)]
    level: Level,

    /// Generated field height, overrides level. Must be odd.
    #[arg(long)]
    rows: Option<usize>,

    /// Generated field width, overrides level. Must be odd.
    #[arg(long)]
    cols: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Explicit rows and cols win over the level
    fn dimensions(&self) -> (usize, usize) {
        (
            self.rows.unwrap_or(self.level.size()),
            self.cols.unwrap_or(self.level.size()),
        )
    }
}

/// Generate maze, print it as emojis
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let (rows, cols) = args.dimensions();

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen.generate_maze(rows, cols)?;
    info!("Generated {}x{} maze", rows, cols);
    println!("{}", grid);
    Ok(())
}
