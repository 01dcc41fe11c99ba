//! Maze generation

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{Grid, MazeError, Point, Square};

/// Maze generator with its own random source.
///
/// The same seed always produces the same maze.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    /// Seeded generator, or seeded from entropy when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_rng(if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        })
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Carving steps: two squares right, down, left, up
    const DIRECTIONS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

    /// Smallest accepted side length
    pub const MIN_SIZE: usize = 5;

    pub fn with_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a perfect maze (exactly one path between any two open squares)
    ///
    /// Rooms sit at odd coordinates and are joined by knocking out the wall
    /// square between them. Starting from `(1, 1)`, walk to a random
    /// unvisited room two steps away; when there is none, backtrack.
    ///
    /// Both dimensions must be odd and at least [Self::MIN_SIZE].
    pub fn generate_maze(&mut self, rows: usize, cols: usize) -> Result<Grid, MazeError> {
        if rows < Self::MIN_SIZE || cols < Self::MIN_SIZE || rows % 2 == 0 || cols % 2 == 0 {
            return Err(MazeError::InvalidDimensions {
                rows,
                cols,
                min: Self::MIN_SIZE,
            });
        }

        let mut grid = Grid::new(rows, cols);
        let start = grid.start();
        grid.set(start, Square::Open)?;

        let mut stack = vec![start];
        let mut carved = 1;
        while let Some(&current) = stack.last() {
            let mut directions = Self::DIRECTIONS;
            directions.shuffle(&mut self.random);

            let next = directions
                .iter()
                .filter_map(|&(dr, dc)| current.offset(dr, dc))
                .filter(|room| grid.get(*room) == Ok(Square::Wall))
                .last();

            if let Some(room) = next {
                let between = Point::new(
                    (current.row + room.row) / 2,
                    (current.col + room.col) / 2,
                );
                grid.set(between, Square::Open)?;
                grid.set(room, Square::Open)?;
                carved += 2;
                stack.push(room);
            } else {
                stack.pop();
            }
        }

        let patched = open_goal(&mut grid)?;
        debug!(
            "Generated {}x{} maze: {} squares carved, goal patched: {}",
            rows, cols, carved, patched
        );
        Ok(grid)
    }
}

/// Force the goal open, and open a square next to it if it is walled in
/// from the interior side.
///
/// The extra opening may close a loop. Returns whether it was needed.
fn open_goal(grid: &mut Grid) -> Result<bool, MazeError> {
    let goal = grid.goal();
    grid.set(goal, Square::Open)?;

    let above = Point::new(goal.row - 1, goal.col);
    let left = Point::new(goal.row, goal.col - 1);
    if grid.get(above)? == Square::Wall && grid.get(left)? == Square::Wall {
        grid.set(above, Square::Open)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Generate a `rows` x `cols` maze, seeded from entropy if `seed` is `None`
pub fn generate(rows: usize, cols: usize, seed: Option<u64>) -> Result<Grid, MazeError> {
    MazeGenerator::new(seed).generate_maze(rows, cols)
}
