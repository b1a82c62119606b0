//! Reachability oracle.
//!
//! The oracle answers one question: given a grid and a wall placement, can the
//! agent reach the boundary, and if not, what is the enclosure worth? It is
//! the only scoring primitive; every strategy and any alternative backend must
//! be scored by it for results to be comparable.
//!
//! A [`ReachabilityOracle`] owns reusable scratch buffers sized to the grid,
//! so repeated calls do not allocate. Marker arrays are versioned by an epoch
//! counter instead of being cleared. One oracle per thread; the grid itself is
//! shared read-only.

use crate::grid::{CellId, Grid};
use crate::score::{EnclosureScore, ScoreResult};
use crate::wall_set::WallSet;

const NO_PARENT: CellId = CellId::MAX;

/// Breadth-first reachability evaluator with reusable scratch storage.
///
/// # Example
///
/// ```
/// use enclosure_core::{Grid, ReachabilityOracle, WallSet};
///
/// let grid = Grid::builder(3, 3).start(4).budget(4).build().unwrap();
/// let mut oracle = ReachabilityOracle::new(&grid);
///
/// let open = oracle.score(&grid, &WallSet::empty());
/// assert!(open.escaped);
/// assert_eq!(open.total_score, 0);
///
/// let walls = WallSet::new(&grid, [1, 3, 5, 7]).unwrap();
/// let boxed = oracle.score(&grid, &walls);
/// assert!(!boxed.escaped);
/// assert_eq!(boxed.total_score, 1);
/// assert_eq!(oracle.visited(), &[4]);
/// ```
#[derive(Debug, Clone)]
pub struct ReachabilityOracle {
    epoch: u32,
    visit_marks: Vec<u32>,
    wall_marks: Vec<u32>,
    // After a call: exactly the visited cells, in BFS order.
    queue: Vec<CellId>,
    parents: Vec<CellId>,
    first_escape: Option<CellId>,
    evaluations: u64,
}

impl ReachabilityOracle {
    /// Creates an oracle with scratch buffers sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self::with_capacity(grid.cell_count())
    }

    /// Creates an oracle for grids of up to `cell_count` cells.
    pub fn with_capacity(cell_count: usize) -> Self {
        Self {
            epoch: 0,
            visit_marks: vec![0; cell_count],
            wall_marks: vec![0; cell_count],
            queue: Vec::with_capacity(cell_count),
            parents: Vec::new(),
            first_escape: None,
            evaluations: 0,
        }
    }

    fn next_epoch(&mut self, cell_count: usize) {
        if self.visit_marks.len() < cell_count {
            self.visit_marks.resize(cell_count, 0);
            self.wall_marks.resize(cell_count, 0);
        }
        if self.epoch == u32::MAX {
            self.visit_marks.fill(0);
            self.wall_marks.fill(0);
            self.epoch = 0;
        }
        self.epoch += 1;
    }

    fn traverse(&mut self, grid: &Grid, walls: &WallSet, track_parents: bool) -> EnclosureScore {
        self.next_epoch(grid.cell_count());
        self.evaluations += 1;
        let epoch = self.epoch;

        for cell in walls.iter() {
            self.wall_marks[cell] = epoch;
        }
        if track_parents {
            self.parents.clear();
            self.parents.resize(grid.cell_count(), NO_PARENT);
        }

        let cols = grid.cols();
        let rows = grid.rows();
        let start = grid.start();

        self.queue.clear();
        self.queue.push(start);
        self.visit_marks[start] = epoch;
        self.first_escape = None;

        let mut cherries = 0u32;
        let mut head = 0;
        while head < self.queue.len() {
            let current = self.queue[head];
            head += 1;

            if grid.is_cherry(current) {
                cherries += 1;
            }

            let (col, row) = (current % cols, current / cols);
            if col == 0 || row == 0 || col == cols - 1 || row == rows - 1 {
                // Keep going: callers rely on the full region even when escaped.
                self.first_escape.get_or_insert(current);
            }

            // left, right, up, down
            if col > 0 {
                self.try_visit(grid, current - 1, current, track_parents);
            }
            if col + 1 < cols {
                self.try_visit(grid, current + 1, current, track_parents);
            }
            if row > 0 {
                self.try_visit(grid, current - cols, current, track_parents);
            }
            if row + 1 < rows {
                self.try_visit(grid, current + cols, current, track_parents);
            }
            for exit in grid.portal_exits(current) {
                self.try_visit(grid, exit, current, track_parents);
            }
        }

        EnclosureScore::from_counts(
            self.first_escape.is_some(),
            self.queue.len() as u32,
            cherries,
        )
    }

    #[inline]
    fn try_visit(&mut self, grid: &Grid, cell: CellId, from: CellId, track_parents: bool) {
        let epoch = self.epoch;
        if self.visit_marks[cell] == epoch
            || self.wall_marks[cell] == epoch
            || grid.is_blocked(cell)
        {
            return;
        }
        self.visit_marks[cell] = epoch;
        if track_parents {
            self.parents[cell] = from;
        }
        self.queue.push(cell);
    }

    /// Scores a wall placement without materialising the visited set.
    ///
    /// This is the hot path used by every strategy. The visited cells of the
    /// last call stay available through [`visited`](Self::visited).
    pub fn score(&mut self, grid: &Grid, walls: &WallSet) -> EnclosureScore {
        self.traverse(grid, walls, false)
    }

    /// Scores a wall placement and returns the full result.
    pub fn evaluate(&mut self, grid: &Grid, walls: &WallSet) -> ScoreResult {
        let score = self.traverse(grid, walls, false);
        let mut visited = self.queue.clone();
        visited.sort_unstable();
        ScoreResult {
            escaped: score.escaped,
            visited,
            area: score.area,
            cherry_bonus: score.cherry_bonus,
            total_score: score.total_score,
            wall_count: walls.len(),
        }
    }

    /// Returns the shortest path from the start to the first boundary cell
    /// reached, or `None` if the agent is enclosed.
    ///
    /// Portal hops appear as consecutive path entries.
    pub fn escape_path(&mut self, grid: &Grid, walls: &WallSet) -> Option<Vec<CellId>> {
        self.traverse(grid, walls, true);
        let mut cell = self.first_escape?;
        let mut path = vec![cell];
        while self.parents[cell] != NO_PARENT {
            cell = self.parents[cell];
            path.push(cell);
        }
        path.reverse();
        Some(path)
    }

    /// Returns the cells reached by the last call, in visiting order.
    pub fn visited(&self) -> &[CellId] {
        &self.queue
    }

    /// Returns true if `cell` was reached by the last call.
    pub fn was_visited(&self, cell: CellId) -> bool {
        self.epoch > 0 && self.visit_marks.get(cell) == Some(&self.epoch)
    }

    /// Returns the number of calls made on this oracle.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

/// Scores a wall placement with a throwaway oracle.
///
/// Convenient for one-off checks; strategies keep a [`ReachabilityOracle`]
/// per worker instead.
pub fn evaluate(grid: &Grid, walls: &WallSet) -> ScoreResult {
    ReachabilityOracle::new(grid).evaluate(grid, walls)
}

/// Traces how the agent escapes, or `None` if it is enclosed.
pub fn escape_path(grid: &Grid, walls: &WallSet) -> Option<Vec<CellId>> {
    ReachabilityOracle::new(grid).escape_path(grid, walls)
}
