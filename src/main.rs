//! CLI for maze solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use log::info;
use maze_runner::{with_start, Grid, Level, MazeGenerator, ParsedMaze, Solver};

/// The shortest way out of a maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File, where to read the maze. Use `-` for stdin. A new maze is
    /// generated if omitted.
    file: Option<PathBuf>,

    /// Difficulty of a generated maze
    #[arg(short, long, value_enum, default_value_t, conflicts_with = "file")]
    level: Level,

    /// Generated maze height, overrides level
    #[arg(long, conflicts_with = "file")]
    rows: Option<usize>,

    /// Generated maze width, overrides level
    #[arg(long, conflicts_with = "file")]
    cols: Option<usize>,

    /// Random seed for a generated maze
    #[arg(long, conflicts_with = "file")]
    seed: Option<u64>,

    /// Path search algorithm
    #[arg(short, long, value_enum, default_value_t)]
    solver: Solver,

    /// Print the maze with the path drawn on it
    #[arg(short = 'p', long)]
    show_path: bool,
}

impl Args {
    /// Size of a generated maze: explicit rows and cols win over the level
    fn dimensions(&self) -> (usize, usize) {
        (
            self.rows.unwrap_or(self.level.size()),
            self.cols.unwrap_or(self.level.size()),
        )
    }
}

fn read_maze(args: &Args) -> anyhow::Result<ParsedMaze> {
    let Some(file) = &args.file else {
        let (rows, cols) = args.dimensions();
        let grid = MazeGenerator::new(args.seed).generate_maze(rows, cols)?;
        info!("Generated {}x{} maze", rows, cols);
        return Ok(ParsedMaze {
            start: grid.start(),
            goal: grid.goal(),
            grid,
        });
    };

    let emojis = if file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("Could not read {}", file.display()))?
    };
    Ok(Grid::parse_emojis(emojis.trim())?)
}

/// Read or generate a maze, print the path length
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let ParsedMaze { grid, start, goal } = read_maze(&args)?;

    match args.solver.solve(&grid, start, goal)? {
        Some(path) => {
            if args.show_path {
                println!("{}", grid.render(start, goal, &with_start(start, &path)));
            }
            match args.solver {
                Solver::Astar => println!("The shortest path is {} steps.", path.len()),
                Solver::Backtrack => println!("Found a path of {} steps.", path.len()),
            }
        }
        None => {
            if args.show_path {
                println!("{}", grid.render(start, goal, &[]));
            }
            println!("There is no way from {} to {}.", start, goal);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use maze_runner::Solver;

    use crate::Args;

    #[test]
    fn generates_level_size_without_file() {
        let args = Args::try_parse_from(["solve-maze", "--level", "hard"]).unwrap();
        assert!(args.file.is_none());
        assert_eq!(args.dimensions(), (31, 31));
        assert_eq!(args.solver, Solver::Astar);
    }

    #[test]
    fn rows_and_cols_override_level() {
        let args =
            Args::try_parse_from(["solve-maze", "--level", "hard", "--rows", "7", "--cols", "9"])
                .unwrap();
        assert_eq!(args.dimensions(), (7, 9));

        let args = Args::try_parse_from(["solve-maze", "--cols", "11"]).unwrap();
        assert_eq!(args.dimensions(), (25, 11));
    }

    #[test]
    fn file_excludes_generation_options() {
        let args = Args::try_parse_from(["solve-maze", "maze.txt", "-s", "backtrack"]).unwrap();
        assert_eq!(args.file.as_deref(), Some(std::path::Path::new("maze.txt")));
        assert_eq!(args.solver, Solver::Backtrack);

        for option in [["--rows", "7"], ["--seed", "1"], ["--level", "easy"]] {
            let mut argv = vec!["solve-maze", "maze.txt"];
            argv.extend(option);
            assert!(Args::try_parse_from(argv).is_err(), "{option:?}");
        }
    }

    #[test]
    fn no_generate_flag() {
        assert!(Args::try_parse_from(["solve-maze", "--generate"]).is_err());
    }
}
