//! Path search through a maze
//!
//! Paths are returned without the start square and with the goal square, so
//! the length of a path is the number of steps taken. Use [with_start] to get
//! the full sequence for drawing.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use clap::ValueEnum;
use log::{debug, warn};

use crate::{Grid, MazeError, Point};

/// Available path search algorithms
#[derive(ValueEnum, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Solver {
    /// A* search, always returns a shortest path
    #[default]
    Astar,
    /// Depth-first backtracking, returns the first path found
    Backtrack,
}

impl Solver {
    pub fn solve(
        self,
        grid: &Grid,
        start: Point,
        goal: Point,
    ) -> Result<Option<Vec<Point>>, MazeError> {
        match self {
            Solver::Astar => astar(grid, start, goal),
            Solver::Backtrack => backtracking_solve(grid, start, goal),
        }
    }
}

/// Find a shortest path from `start` to `goal`
///
/// Same as [astar].
pub fn solve(grid: &Grid, start: Point, goal: Point) -> Result<Option<Vec<Point>>, MazeError> {
    astar(grid, start, goal)
}

/// Both endpoints must be open squares inside the grid
fn check_endpoint(grid: &Grid, point: Point) -> Result<(), MazeError> {
    if grid.is_open(point) {
        Ok(())
    } else {
        // `get` reports out-of-bounds points
        grid.get(point)?;
        Err(MazeError::NotOpen { point })
    }
}

/// A* search with the Manhattan distance heuristic
///
/// Returns `Ok(None)` if `goal` cannot be reached. When several shortest
/// paths exist, squares with equal estimated cost are expanded in
/// (row, col) order.
///
/// Errors if either endpoint is outside the grid or a wall.
pub fn astar(grid: &Grid, start: Point, goal: Point) -> Result<Option<Vec<Point>>, MazeError> {
    check_endpoint(grid, start)?;
    check_endpoint(grid, goal)?;

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut g_score: HashMap<Point, usize> = HashMap::from([(start, 0)]);
    open_set.push(Reverse((start.manhattan(&goal), start)));

    let mut expanded = 0;
    while let Some(Reverse((f, current))) = open_set.pop() {
        if current == goal {
            let path = reconstruct_path(&came_from, goal);
            debug!(
                "A* reached {} in {} steps, {} squares expanded",
                goal,
                path.len(),
                expanded
            );
            return Ok(Some(path));
        }

        let g = g_score[&current];
        if f > g + current.manhattan(&goal) {
            // Stale entry, a shorter route to `current` was found after pushing
            continue;
        }
        expanded += 1;

        for neighbour in grid.neighbours(current) {
            let tentative = g + 1;
            if g_score.get(&neighbour).map_or(true, |&known| tentative < known) {
                came_from.insert(neighbour, current);
                g_score.insert(neighbour, tentative);
                open_set.push(Reverse((tentative + neighbour.manhattan(&goal), neighbour)));
            }
        }
    }

    warn!("No path from {} to {}", start, goal);
    Ok(None)
}

/// Follow predecessors back from `goal`; the start square has none.
fn reconstruct_path(came_from: &HashMap<Point, Point>, goal: Point) -> Vec<Point> {
    let mut path = vec![];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(current);
        current = prev;
    }
    path.reverse();
    path
}

/// Depth-first backtracking search
///
/// Tries right, down, left and up in that order from every square and
/// returns the first path that reaches `goal`. The path is valid but not
/// necessarily the shortest one; use [astar] for that.
///
/// Errors if either endpoint is outside the grid or a wall.
pub fn backtracking_solve(
    grid: &Grid,
    start: Point,
    goal: Point,
) -> Result<Option<Vec<Point>>, MazeError> {
    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

    check_endpoint(grid, start)?;
    check_endpoint(grid, goal)?;

    let mut visited = HashSet::from([start]);
    // Squares on the current route, each with the number of directions tried
    let mut stack: Vec<(Point, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (current, tried) = *frame;
        if current == goal {
            let path: Vec<Point> = stack.iter().skip(1).map(|(p, _)| *p).collect();
            debug!(
                "Backtracking reached {} in {} steps, {} squares visited",
                goal,
                path.len(),
                visited.len()
            );
            return Ok(Some(path));
        }

        match DIRECTIONS.get(tried) {
            Some(&(dr, dc)) => {
                frame.1 += 1;
                if let Some(next) = current.offset(dr, dc).filter(|p| grid.is_open(*p)) {
                    if visited.insert(next) {
                        stack.push((next, 0));
                    }
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    warn!("No path from {} to {}", start, goal);
    Ok(None)
}

/// Full route including `start`, for drawing
pub fn with_start(start: Point, path: &[Point]) -> Vec<Point> {
    std::iter::once(start).chain(path.iter().copied()).collect()
}
