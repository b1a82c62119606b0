//! Cells eligible to hold a wall.

use smallvec::SmallVec;

use crate::grid::{CellId, Grid};
use crate::wall_set::WallSet;

/// The ordered set of cells a strategy may wall off.
///
/// Computed once per [`Grid`]. Enumeration order is row-major cell order and
/// is part of the contract: greedy tie-breaks and chokepoint ranking depend on
/// it. Strategies refer to candidates by *position* in this order.
///
/// # Example
///
/// ```
/// use enclosure_core::{CandidateSet, Grid};
///
/// let grid = Grid::builder(3, 3).start(4).water(0).cherry(8).build().unwrap();
/// let candidates = CandidateSet::new(&grid);
/// assert_eq!(candidates.cells(), &[1, 2, 3, 5, 6, 7]);
/// assert_eq!(candidates.position_of(5), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    cells: Vec<CellId>,
    // cell -> position, usize::MAX when not a candidate
    positions: Vec<usize>,
}

impl CandidateSet {
    pub fn new(grid: &Grid) -> Self {
        let cells: Vec<CellId> = (0..grid.cell_count())
            .filter(|&cell| grid.is_wall_candidate(cell))
            .collect();
        let mut positions = vec![usize::MAX; grid.cell_count()];
        for (position, &cell) in cells.iter().enumerate() {
            positions[cell] = position;
        }
        Self { cells, positions }
    }

    /// Returns candidate cells in enumeration order.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at a candidate position.
    pub fn cell(&self, position: usize) -> CellId {
        self.cells[position]
    }

    /// Returns the candidate position of a cell, if it is a candidate.
    pub fn position_of(&self, cell: CellId) -> Option<usize> {
        self.positions
            .get(cell)
            .copied()
            .filter(|&position| position != usize::MAX)
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.position_of(cell).is_some()
    }

    /// Builds a wall set from candidate positions.
    ///
    /// Duplicate positions collapse. Panics if a position is out of range.
    pub fn wall_set(&self, positions: &[usize]) -> WallSet {
        WallSet::from_valid(positions.iter().map(|&p| self.cells[p]).collect())
    }

    /// Builds a wall set from candidate positions plus one extra position.
    pub fn wall_set_with(&self, positions: &[usize], extra: usize) -> WallSet {
        let mut cells: SmallVec<[CellId; 16]> = positions.iter().map(|&p| self.cells[p]).collect();
        cells.push(self.cells[extra]);
        WallSet::from_valid(cells)
    }

    /// Converts a wall set back into candidate positions.
    pub fn positions_of(&self, walls: &WallSet) -> Vec<usize> {
        walls.iter().filter_map(|cell| self.position_of(cell)).collect()
    }
}
