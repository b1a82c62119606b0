//! Enclosure score types.

use std::cmp::Ordering;
use std::fmt;

use crate::grid::CellId;

/// Points awarded per cherry inside the enclosure.
pub const CHERRY_BONUS: u32 = 3;

/// Compact outcome of one oracle call.
///
/// This is what strategies compare. Ordering follows `total_score`, so an
/// escaping placement (score 0) never beats an enclosure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnclosureScore {
    /// The agent reached a boundary cell.
    pub escaped: bool,
    /// Number of reachable cells, including the start.
    ///
    /// Filled in for escaping placements too; strategies use it as a heuristic.
    pub area: u32,
    /// `CHERRY_BONUS` per cherry reached; zero when escaped.
    pub cherry_bonus: u32,
    /// `area + cherry_bonus`, or zero when escaped.
    pub total_score: u32,
}

impl EnclosureScore {
    /// Builds a score from traversal counts, applying the escape rule.
    pub fn from_counts(escaped: bool, area: u32, cherries_reached: u32) -> Self {
        if escaped {
            Self {
                escaped,
                area,
                cherry_bonus: 0,
                total_score: 0,
            }
        } else {
            let cherry_bonus = CHERRY_BONUS * cherries_reached;
            Self {
                escaped,
                area,
                cherry_bonus,
                total_score: area + cherry_bonus,
            }
        }
    }

    /// Returns true if the agent is trapped.
    pub fn is_enclosed(&self) -> bool {
        !self.escaped
    }
}

impl PartialOrd for EnclosureScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnclosureScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_score
            .cmp(&other.total_score)
            .then_with(|| other.escaped.cmp(&self.escaped))
            // Smaller escaping regions are closer to an enclosure.
            .then_with(|| other.area.cmp(&self.area))
            .then_with(|| self.cherry_bonus.cmp(&other.cherry_bonus))
    }
}

impl fmt::Display for EnclosureScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.escaped {
            write!(f, "escaped (area {})", self.area)
        } else {
            write!(
                f,
                "{} (area {} + cherries {})",
                self.total_score, self.area, self.cherry_bonus
            )
        }
    }
}

/// Full outcome of one oracle call, including the reachable region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    pub escaped: bool,
    /// Reachable cells in ascending order.
    pub visited: Vec<CellId>,
    pub area: u32,
    pub cherry_bonus: u32,
    pub total_score: u32,
    /// Number of placed walls that were evaluated.
    pub wall_count: usize,
}

impl ScoreResult {
    /// Returns the compact score.
    pub fn score(&self) -> EnclosureScore {
        EnclosureScore {
            escaped: self.escaped,
            area: self.area,
            cherry_bonus: self.cherry_bonus,
            total_score: self.total_score,
        }
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.visited.binary_search(&cell).is_ok()
    }
}
