//! A grid bundled with its candidate cells.

use enclosure_core::{evaluate, CandidateSet, Grid, ScoreResult, WallSet};

/// The input every strategy works on.
///
/// Built once per grid and shared read-only by all strategies and workers.
///
/// # Example
///
/// ```
/// use enclosure_core::Grid;
/// use enclosure_solver::Problem;
///
/// let grid = Grid::builder(3, 3).start(4).budget(10).build().unwrap();
/// let problem = Problem::new(grid);
/// assert_eq!(problem.candidates().len(), 8);
/// // Never more walls than there are candidates.
/// assert_eq!(problem.num_walls(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    grid: Grid,
    candidates: CandidateSet,
}

impl Problem {
    pub fn new(grid: Grid) -> Self {
        let candidates = CandidateSet::new(&grid);
        Self { grid, candidates }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Returns the wall count fixed-size strategies place: the budget clamped
    /// to the number of candidates.
    pub fn num_walls(&self) -> usize {
        self.grid.budget().min(self.candidates.len())
    }

    /// Scores a wall set with a throwaway oracle.
    pub fn evaluate(&self, walls: &WallSet) -> ScoreResult {
        evaluate(&self.grid, walls)
    }
}
