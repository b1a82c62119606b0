//! Immutable puzzle grid.
//!
//! A [`Grid`] is built once from external input and then shared by reference
//! across every oracle call and every strategy of a run. Cells are addressed
//! by row-major [`CellId`] (`row * cols + col`).

mod builder;

use std::fmt;

pub use builder::GridBuilder;

use crate::error::{EnclosureError, Result};

/// Row-major cell index.
pub type CellId = usize;

/// Identifier shared by the cells of one portal channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelId(pub u16);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ground type of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// Walkable.
    #[default]
    Grass,
    /// Impassable.
    Water,
}

/// Immutable puzzle description.
///
/// # Example
///
/// ```
/// use enclosure_core::{Grid, Terrain};
///
/// let grid = Grid::builder(3, 3).start(4).budget(4).build().unwrap();
/// assert_eq!(grid.cell_count(), 9);
/// assert_eq!(grid.terrain(0), Terrain::Grass);
/// assert!(grid.is_boundary(0));
/// assert!(!grid.is_boundary(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    terrain: Vec<Terrain>,
    cherries: Vec<bool>,
    portals: Vec<Option<ChannelId>>,
    fixed_walls: Vec<bool>,
    start: CellId,
    budget: usize,
    // water or fixed wall
    blocked: Vec<bool>,
    // index into `portal_groups` for cells whose channel has >= 2 members
    portal_group: Vec<Option<usize>>,
    portal_groups: Vec<Vec<CellId>>,
}

impl Grid {
    /// Starts building a grid of the given dimensions.
    pub fn builder(cols: usize, rows: usize) -> GridBuilder {
        GridBuilder::new(cols, rows)
    }

    /// Builds a grid from per-cell layers.
    ///
    /// `starts` lists every cell marked as the agent's start; exactly one is
    /// required. All layers must have `cols * rows` entries.
    ///
    /// # Errors
    ///
    /// Returns [`EnclosureError::InvalidInput`] for non-positive dimensions,
    /// mismatched layer lengths, a start count other than one, or a start that
    /// is out of range, blocked or a cherry.
    pub fn from_layers(
        cols: usize,
        rows: usize,
        terrain: Vec<Terrain>,
        cherries: Vec<bool>,
        portals: Vec<Option<ChannelId>>,
        starts: &[CellId],
        budget: usize,
    ) -> Result<Self> {
        let fixed_walls = vec![false; terrain.len()];
        Self::assemble(
            cols,
            rows,
            terrain,
            cherries,
            portals,
            fixed_walls,
            starts,
            budget,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        cols: usize,
        rows: usize,
        terrain: Vec<Terrain>,
        cherries: Vec<bool>,
        portals: Vec<Option<ChannelId>>,
        fixed_walls: Vec<bool>,
        starts: &[CellId],
        budget: usize,
    ) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(EnclosureError::InvalidInput(format!(
                "grid dimensions must be positive, got {cols}x{rows}"
            )));
        }
        let cell_count = cols.checked_mul(rows).ok_or_else(|| {
            EnclosureError::InvalidInput(format!("grid {cols}x{rows} is too large"))
        })?;

        for (name, len) in [
            ("terrain", terrain.len()),
            ("cherries", cherries.len()),
            ("portals", portals.len()),
            ("walls", fixed_walls.len()),
        ] {
            if len != cell_count {
                return Err(EnclosureError::InvalidInput(format!(
                    "{name} layer has {len} cells, expected {cell_count}"
                )));
            }
        }

        let start = match starts {
            [start] => *start,
            [] => {
                return Err(EnclosureError::InvalidInput(
                    "grid has no start cell".to_string(),
                ))
            }
            many => {
                return Err(EnclosureError::InvalidInput(format!(
                    "grid has {} start cells, expected exactly one",
                    many.len()
                )))
            }
        };
        if start >= cell_count {
            return Err(EnclosureError::InvalidInput(format!(
                "start cell {start} is outside a grid of {cell_count} cells"
            )));
        }
        if terrain[start] == Terrain::Water || fixed_walls[start] {
            return Err(EnclosureError::InvalidInput(format!(
                "start cell {start} is not walkable"
            )));
        }
        if cherries[start] {
            return Err(EnclosureError::InvalidInput(format!(
                "start cell {start} cannot hold a cherry"
            )));
        }

        let blocked = terrain
            .iter()
            .zip(&fixed_walls)
            .map(|(t, wall)| *t == Terrain::Water || *wall)
            .collect();

        let mut channels: Vec<(ChannelId, Vec<CellId>)> = Vec::new();
        for (cell, channel) in portals.iter().enumerate() {
            let Some(channel) = channel else { continue };
            match channels.iter_mut().find(|(id, _)| id == channel) {
                Some((_, members)) => members.push(cell),
                None => channels.push((*channel, vec![cell])),
            }
        }

        let mut portal_group = vec![None; cell_count];
        let mut portal_groups = Vec::new();
        for (_, members) in channels {
            // A lone portal has nowhere to go.
            if members.len() < 2 {
                continue;
            }
            for &cell in &members {
                portal_group[cell] = Some(portal_groups.len());
            }
            portal_groups.push(members);
        }

        Ok(Self {
            cols,
            rows,
            terrain,
            cherries,
            portals,
            fixed_walls,
            start,
            budget,
            blocked,
            portal_group,
            portal_groups,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns `cols * rows`.
    pub fn cell_count(&self) -> usize {
        self.terrain.len()
    }

    /// Returns the agent's start cell.
    pub fn start(&self) -> CellId {
        self.start
    }

    /// Returns the maximum number of walls a strategy may place.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Returns a copy of this grid with a different wall budget.
    pub fn with_budget(&self, budget: usize) -> Self {
        Self {
            budget,
            ..self.clone()
        }
    }

    pub fn terrain(&self, cell: CellId) -> Terrain {
        self.terrain[cell]
    }

    pub fn is_cherry(&self, cell: CellId) -> bool {
        self.cherries[cell]
    }

    pub fn portal_channel(&self, cell: CellId) -> Option<ChannelId> {
        self.portals[cell]
    }

    /// Returns true if the cell held a wall before any placement.
    pub fn is_fixed_wall(&self, cell: CellId) -> bool {
        self.fixed_walls[cell]
    }

    /// Returns true if the cell can never be entered (water or fixed wall).
    pub fn is_blocked(&self, cell: CellId) -> bool {
        self.blocked[cell]
    }

    /// Returns the other cells the agent can teleport to from `cell`.
    ///
    /// Empty for cells without a portal and for single-member channels.
    pub fn portal_exits(&self, cell: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.portal_group[cell]
            .map(|group| self.portal_groups[group].as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |&exit| exit != cell)
    }

    /// Splits a cell index into `(col, row)`.
    pub fn coords(&self, cell: CellId) -> (usize, usize) {
        (cell % self.cols, cell / self.cols)
    }

    /// Joins `(col, row)` into a cell index.
    pub fn cell_at(&self, col: usize, row: usize) -> CellId {
        row * self.cols + col
    }

    /// Returns true if the cell lies on the outer edge of the grid.
    pub fn is_boundary(&self, cell: CellId) -> bool {
        let (col, row) = self.coords(cell);
        col == 0 || row == 0 || col == self.cols - 1 || row == self.rows - 1
    }

    /// Returns the walkable boundary cells, in row-major order.
    ///
    /// These are the cells through which the agent can escape.
    pub fn edge_cells(&self) -> Vec<CellId> {
        (0..self.cell_count())
            .filter(|&cell| self.is_boundary(cell) && !self.blocked[cell])
            .collect()
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, a: CellId, b: CellId) -> usize {
        let (ac, ar) = self.coords(a);
        let (bc, br) = self.coords(b);
        ac.abs_diff(bc) + ar.abs_diff(br)
    }

    /// Returns true if a wall may be placed on the cell.
    ///
    /// Walls go on grass that is not the start, not a cherry, not a portal and
    /// not already walled.
    pub fn is_wall_candidate(&self, cell: CellId) -> bool {
        cell < self.cell_count()
            && self.terrain[cell] == Terrain::Grass
            && cell != self.start
            && !self.cherries[cell]
            && self.portals[cell].is_none()
            && !self.fixed_walls[cell]
    }
}
