//! Trial wall placements.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{EnclosureError, Result};
use crate::grid::{CellId, Grid};

/// A set of placed walls, overlaid on an immutable [`Grid`].
///
/// Cells are kept sorted and unique. A `WallSet` only ever holds cells that
/// may carry a wall: [`WallSet::new`] rejects anything else, and sets built
/// through [`CandidateSet`](crate::CandidateSet) are valid by construction.
///
/// # Example
///
/// ```
/// use enclosure_core::{Grid, WallSet};
///
/// let grid = Grid::builder(3, 3).start(4).budget(4).build().unwrap();
/// let walls = WallSet::new(&grid, [7, 1, 5, 3]).unwrap();
/// assert_eq!(walls.cells(), &[1, 3, 5, 7]);
///
/// // The start cannot hold a wall.
/// assert!(WallSet::new(&grid, [4]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSet {
    cells: SmallVec<[CellId; 16]>,
}

impl WallSet {
    /// Returns an empty wall set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates `cells` against `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`EnclosureError::InvalidWallSet`] if a cell is out of range,
    /// water, a pre-placed wall, the start, a cherry or a portal, if a cell is
    /// listed twice, or if the set exceeds the grid's budget.
    pub fn new(grid: &Grid, cells: impl IntoIterator<Item = CellId>) -> Result<Self> {
        let mut sorted: SmallVec<[CellId; 16]> = cells.into_iter().collect();
        sorted.sort_unstable();

        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(EnclosureError::InvalidWallSet(format!(
                    "cell {} is listed twice",
                    pair[0]
                )));
            }
        }
        if let Some(&cell) = sorted.iter().find(|&&c| !grid.is_wall_candidate(c)) {
            return Err(EnclosureError::InvalidWallSet(format!(
                "cell {cell} cannot hold a wall"
            )));
        }
        if sorted.len() > grid.budget() {
            return Err(EnclosureError::InvalidWallSet(format!(
                "{} walls exceed the budget of {}",
                sorted.len(),
                grid.budget()
            )));
        }
        Ok(Self { cells: sorted })
    }

    /// Builds a wall set from cells already known to be valid candidates.
    pub(crate) fn from_valid(mut cells: SmallVec<[CellId; 16]>) -> Self {
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }

    /// Returns the walled cells in ascending order.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().copied()
    }
}

impl fmt::Display for WallSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "]")
    }
}
