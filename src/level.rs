//! Difficulty levels

use clap::ValueEnum;

use crate::{maze_generator::generate, Grid, MazeError};

/// Difficulty of a generated maze; only the size changes
#[derive(ValueEnum, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Side length of the square maze
    pub const fn size(self) -> usize {
        match self {
            Level::Easy | Level::Medium => 25,
            // Even sizes do not fit the carving lattice, so not 30
            Level::Hard => 31,
        }
    }

    /// Generate a square maze for this level
    pub fn generate(self, seed: Option<u64>) -> Result<Grid, MazeError> {
        generate(self.size(), self.size(), seed)
    }
}

#[cfg(test)]
mod tests {
    use crate::Level;

    #[test]
    fn level_sizes_are_odd() {
        for level in [Level::Easy, Level::Medium, Level::Hard] {
            assert_eq!(level.size() % 2, 1);
        }
    }

    #[test]
    fn hard_maze_is_largest() {
        let grid = Level::Hard.generate(Some(3)).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (31, 31));
        assert!(Level::Hard.size() > Level::Easy.size());
    }
}
