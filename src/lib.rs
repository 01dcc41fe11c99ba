//! Generate perfect mazes and find the shortest way through them
//!
//! A maze is a [Grid] of wall and open squares. [MazeGenerator] carves a
//! maze with randomized depth-first backtracking; [astar] finds the
//! shortest path from the start square to the goal square.
//!
//! # Examples
//! ## Generate and solve
//! ```
//! use maze_runner::{generate, solve};
//!
//! let grid = generate(5, 5, Some(7)).unwrap();
//! let path = solve(&grid, grid.start(), grid.goal()).unwrap().unwrap();
//! assert_eq!(path.last(), Some(&grid.goal()));
//! println!("{}", grid.render(grid.start(), grid.goal(), &path));
//! ```
//!
//! ## Solve a hand-written maze
//! ```
//! use maze_runner::{astar, Grid};
//!
//! let maze_emojis = "
//! 🟫🟫🟫🟫🟫🟫🟫
//! 🟫🏃🟩🟩🟩🟩🟫
//! 🟫🟫🟫🟫🟫🟩🟫
//! 🟫🟩🟩🟩🟫🟩🟫
//! 🟫🟩🟫🟩🟫🟩🟫
//! 🟫🟩🟫🟩🟩❎🟫
//! 🟫🟫🟫🟫🟫🟫🟫";
//! let maze = Grid::parse_emojis(maze_emojis.trim()).unwrap();
//! let path = astar(&maze.grid, maze.start, maze.goal).unwrap().unwrap();
//! assert_eq!(path.len(), 8);
//! ```

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

pub mod level;
pub mod maze_generator;
pub mod pathfinding;

pub use level::Level;
pub use maze_generator::{generate, MazeGenerator};
pub use pathfinding::{astar, backtracking_solve, solve, with_start, Solver};

/// Location in the maze
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`
    pub fn manhattan(&self, other: &Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if `other` is one orthogonal step away
    pub fn is_adjacent(&self, other: &Point) -> bool {
        self.manhattan(other) == 1
    }

    /// Shift by (`d_row`, `d_col`), or `None` if that would go below zero.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Point> {
        Some(Point {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single square
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Square {
    Wall,
    Open,
}

/// Errors raised when a maze or a query breaks its contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Maze dimensions must be odd and at least {min}, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize, min: usize },

    #[error("Point {point} is outside the {rows}x{cols} maze")]
    OutOfBounds {
        point: Point,
        rows: usize,
        cols: usize,
    },

    #[error("Point {point} is a wall")]
    NotOpen { point: Point },

    #[error("Unexpected character `{character}` at row={row}, col={col}")]
    UnexpectedCharacter {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("Maze layout is empty")]
    EmptyLayout,

    #[error("Row {row} has {found} squares, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular matrix of squares, stored row by row
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    squares: Vec<Square>,
}

/// Grid parsed from text, with the endpoints marked in the layout
#[derive(Debug, Clone)]
pub struct ParsedMaze {
    pub grid: Grid,
    pub start: Point,
    pub goal: Point,
}

impl Grid {
    const S_WALL: char = '🟫';
    const S_OPEN: char = '🟩';
    const S_START: char = '🏃';
    const S_GOAL: char = '❎';
    const S_PATH: char = '🟨';

    /// Orthogonal steps: up, down, left, right
    const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Create a grid where every square is a wall
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            squares: vec![Square::Wall; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.cols
    }

    /// Fixed start square, `(1, 1)`
    pub fn start(&self) -> Point {
        Point::new(1, 1)
    }

    /// Fixed goal square, `(rows - 2, cols - 2)`
    pub fn goal(&self) -> Point {
        Point::new(self.rows.saturating_sub(2), self.cols.saturating_sub(2))
    }

    fn index(&self, point: Point) -> Result<usize, MazeError> {
        if self.contains(point) {
            Ok(point.row * self.cols + point.col)
        } else {
            Err(MazeError::OutOfBounds {
                point,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, point: Point) -> Result<Square, MazeError> {
        Ok(self.squares[self.index(point)?])
    }

    pub fn set(&mut self, point: Point, square: Square) -> Result<(), MazeError> {
        let idx = self.index(point)?;
        self.squares[idx] = square;
        Ok(())
    }

    /// True for open squares inside the grid; out-of-bounds points are not open.
    pub fn is_open(&self, point: Point) -> bool {
        self.get(point) == Ok(Square::Open)
    }

    /// Iterate over all open squares, row by row
    pub fn open_squares(&self) -> impl Iterator<Item = Point> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Open)
            .map(move |(idx, _)| Point::new(idx / self.cols, idx % self.cols))
    }

    /// Open squares one orthogonal step from `point`, in order up, down,
    /// left, right.
    pub fn neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        Self::NEIGHBOURS
            .into_iter()
            .filter_map(move |(dr, dc)| point.offset(dr, dc))
            .filter(move |p| self.is_open(*p))
    }

    /// Parse maze from its emoji representation
    ///
    /// - `emojis`: one line per row; `🟫` is a wall, `🟩` is open, `🏃`
    ///   marks the start and `❎` the goal. Path squares `🟨` are read as
    ///   open, so rendered solutions parse back.
    ///
    /// Without markers, the start is `(1, 1)` and the goal is
    /// `(rows - 2, cols - 2)`.
    pub fn parse_emojis(emojis: &str) -> Result<ParsedMaze, MazeError> {
        let squares: Vec<Vec<char>> = emojis
            .split('\n')
            .map(|row| row.trim_end_matches('\r').chars().collect())
            .collect();

        let cols = squares.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MazeError::EmptyLayout);
        }

        let mut grid = Grid::new(squares.len(), cols);
        let mut start = None;
        let mut goal = None;

        for (row, line) in squares.iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, c) in line.iter().enumerate() {
                let point = Point::new(row, col);
                let square = match *c {
                    Self::S_WALL => Square::Wall,
                    Self::S_OPEN | Self::S_PATH => Square::Open,
                    Self::S_START => {
                        start = Some(point);
                        Square::Open
                    }
                    Self::S_GOAL => {
                        goal = Some(point);
                        Square::Open
                    }
                    character => {
                        return Err(MazeError::UnexpectedCharacter {
                            character,
                            row,
                            col,
                        })
                    }
                };
                grid.set(point, square)?;
            }
        }

        Ok(ParsedMaze {
            start: start.unwrap_or_else(|| grid.start()),
            goal: goal.unwrap_or_else(|| grid.goal()),
            grid,
        })
    }

    /// Emoji representation, with `path` drawn over the open squares
    pub fn render(&self, start: Point, goal: Point, path: &[Point]) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        let point = Point::new(row, col);
                        if point == start {
                            Self::S_START
                        } else if point == goal {
                            Self::S_GOAL
                        } else if path.contains(&point) {
                            Self::S_PATH
                        } else if self.is_open(point) {
                            Self::S_OPEN
                        } else {
                            Self::S_WALL
                        }
                    })
                    .join("")
            })
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.start(), self.goal(), &[]))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Grid, MazeError, Point, Square};

    #[test]
    fn new_grid_is_all_walls() {
        let grid = Grid::new(5, 7);
        assert_eq!((grid.rows(), grid.cols()), (5, 7));
        assert_eq!(grid.open_squares().count(), 0);
        assert_eq!(grid.get(Point::new(4, 6)), Ok(Square::Wall));
    }

    #[test]
    fn access_is_bounds_checked() {
        let mut grid = Grid::new(5, 5);
        let outside = Point::new(5, 0);
        assert_eq!(
            grid.get(outside),
            Err(MazeError::OutOfBounds {
                point: outside,
                rows: 5,
                cols: 5
            })
        );
        assert!(grid.set(outside, Square::Open).is_err());
        assert!(!grid.is_open(outside));
    }

    #[test]
    fn endpoints_follow_dimensions() {
        let grid = Grid::new(9, 13);
        assert_eq!(grid.start(), Point::new(1, 1));
        assert_eq!(grid.goal(), Point::new(7, 11));
    }

    #[test]
    fn neighbours_are_open_and_ordered() {
        let emojis = "
🟫🟩🟫
🟩🟩🟩
🟫🟫🟫"
            .trim();
        let maze = Grid::parse_emojis(emojis).unwrap();
        let neighbours: Vec<_> = maze.grid.neighbours(Point::new(1, 1)).collect();
        assert_eq!(
            neighbours,
            vec![Point::new(0, 1), Point::new(1, 0), Point::new(1, 2)]
        );
        // Corner at the origin must not underflow
        assert_eq!(maze.grid.neighbours(Point::new(0, 0)).count(), 2);
    }

    #[test]
    fn parse_maze_input() {
        let emojis = "
🟫🟫🟫🟫🟫
🟫🏃🟩🟩🟫
🟫🟫🟫🟩🟫
🟫🟩🟩❎🟫
🟫🟫🟫🟫🟫"
            .trim();
        let maze = Grid::parse_emojis(emojis).unwrap();

        assert_eq!(maze.start, Point::new(1, 1));
        assert_eq!(maze.goal, Point::new(3, 3));
        assert_eq!(maze.grid.open_squares().count(), 7);
        assert_eq!(maze.grid.to_string(), emojis);
    }

    #[test]
    fn parse_without_markers_uses_default_endpoints() {
        let emojis = "
🟫🟫🟫🟫🟫
🟫🟩🟩🟩🟫
🟫🟫🟫🟩🟫
🟫🟫🟫🟩🟫
🟫🟫🟫🟫🟫"
            .trim();
        let maze = Grid::parse_emojis(emojis).unwrap();
        assert_eq!(maze.start, Point::new(1, 1));
        assert_eq!(maze.goal, Point::new(3, 3));
    }

    #[test]
    fn parse_rejects_bad_layouts() {
        assert!(matches!(
            Grid::parse_emojis(""),
            Err(MazeError::EmptyLayout)
        ));
        assert!(matches!(
            Grid::parse_emojis("🟫🟫🟫\n🟫x🟫"),
            Err(MazeError::UnexpectedCharacter {
                character: 'x',
                row: 1,
                col: 1
            })
        ));
        assert!(matches!(
            Grid::parse_emojis("🟫🟫🟫\n🟫🟫"),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn render_draws_path() {
        let mut grid = Grid::new(3, 4);
        for col in 0..4 {
            grid.set(Point::new(1, col), Square::Open).unwrap();
        }
        let path = [Point::new(1, 1), Point::new(1, 2)];
        assert_eq!(
            grid.render(Point::new(1, 0), Point::new(1, 3), &path),
            "🟫🟫🟫🟫\n🏃🟨🟨❎\n🟫🟫🟫🟫"
        );
    }
}
