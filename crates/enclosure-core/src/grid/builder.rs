//! Incremental grid construction.

use super::{CellId, ChannelId, Grid, Terrain};
use crate::error::{EnclosureError, Result};

/// Builder for [`Grid`].
///
/// Every cell starts as plain grass. Out-of-range cells are reported by
/// [`build`](GridBuilder::build) rather than panicking mid-chain.
///
/// # Example
///
/// ```
/// use enclosure_core::{ChannelId, Grid};
///
/// let grid = Grid::builder(5, 5)
///     .start(12)
///     .water(0)
///     .cherry(7)
///     .portal(6, ChannelId(1))
///     .portal(18, ChannelId(1))
///     .wall(13)
///     .budget(3)
///     .build()
///     .unwrap();
///
/// assert!(grid.is_cherry(7));
/// assert_eq!(grid.portal_exits(6).collect::<Vec<_>>(), vec![18]);
/// ```
#[derive(Debug, Clone)]
pub struct GridBuilder {
    cols: usize,
    rows: usize,
    terrain: Vec<Terrain>,
    cherries: Vec<bool>,
    portals: Vec<Option<ChannelId>>,
    fixed_walls: Vec<bool>,
    starts: Vec<CellId>,
    budget: usize,
    out_of_range: Option<CellId>,
}

impl GridBuilder {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cells = cols.saturating_mul(rows);
        Self {
            cols,
            rows,
            terrain: vec![Terrain::Grass; cells],
            cherries: vec![false; cells],
            portals: vec![None; cells],
            fixed_walls: vec![false; cells],
            starts: Vec::new(),
            budget: 0,
            out_of_range: None,
        }
    }

    fn check(&mut self, cell: CellId) -> bool {
        if cell < self.terrain.len() {
            true
        } else {
            self.out_of_range.get_or_insert(cell);
            false
        }
    }

    /// Marks a start cell. Marking more than one makes `build` fail.
    pub fn start(mut self, cell: CellId) -> Self {
        if self.check(cell) {
            self.starts.push(cell);
        }
        self
    }

    pub fn water(mut self, cell: CellId) -> Self {
        if self.check(cell) {
            self.terrain[cell] = Terrain::Water;
        }
        self
    }

    pub fn cherry(mut self, cell: CellId) -> Self {
        if self.check(cell) {
            self.cherries[cell] = true;
        }
        self
    }

    pub fn portal(mut self, cell: CellId, channel: ChannelId) -> Self {
        if self.check(cell) {
            self.portals[cell] = Some(channel);
        }
        self
    }

    /// Adds a pre-placed wall. Pre-placed walls do not count against the budget.
    pub fn wall(mut self, cell: CellId) -> Self {
        if self.check(cell) {
            self.fixed_walls[cell] = true;
        }
        self
    }

    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Validates and builds the grid.
    ///
    /// # Errors
    ///
    /// Returns [`EnclosureError::InvalidInput`] if any cell was out of range,
    /// the dimensions are non-positive, or the start count is not exactly one.
    pub fn build(self) -> Result<Grid> {
        if let Some(cell) = self.out_of_range {
            return Err(EnclosureError::InvalidInput(format!(
                "cell {cell} is outside a {}x{} grid",
                self.cols, self.rows
            )));
        }
        Grid::assemble(
            self.cols,
            self.rows,
            self.terrain,
            self.cherries,
            self.portals,
            self.fixed_walls,
            &self.starts,
            self.budget,
        )
    }
}
