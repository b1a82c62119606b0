//! Single-wall impact ranking.

use enclosure_core::{CellId, EnclosureScore, WallSet};

use crate::parallel::score_batch;
use crate::problem::Problem;

/// A candidate cell with its single-wall impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCell {
    pub cell: CellId,
    /// Position in the candidate set.
    pub position: usize,
    /// Reachable cells removed by walling this cell alone, or a sentinel above
    /// any possible reduction if the wall alone encloses the agent.
    pub importance: u64,
    /// Score of walling this cell alone.
    pub score: EnclosureScore,
}

/// Ranks candidates by how much a single wall on them shrinks the agent's
/// reachable region.
///
/// Used to seed other strategies; it never places more than one wall and is
/// not a solver on its own.
///
/// # Example
///
/// ```
/// use enclosure_core::Grid;
/// use enclosure_solver::{ChokepointAnalyzer, Problem};
///
/// let grid = Grid::builder(5, 5)
///     .start(12)
///     .water(7)
///     .water(11)
///     .water(17)
///     .budget(3)
///     .build()
///     .unwrap();
/// let ranked = ChokepointAnalyzer::rank(&Problem::new(grid));
/// // Walling the only exit encloses the start.
/// assert_eq!(ranked[0].cell, 13);
/// assert!(!ranked[0].score.escaped);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ChokepointAnalyzer;

impl ChokepointAnalyzer {
    /// Returns every candidate ranked by importance, descending.
    ///
    /// Ties keep candidate enumeration order.
    pub fn rank(problem: &Problem) -> Vec<RankedCell> {
        let grid = problem.grid();
        let candidates = problem.candidates();
        let baseline = problem.evaluate(&WallSet::empty());

        let positions: Vec<usize> = (0..candidates.len()).collect();
        let scores = score_batch(grid, &positions, |&p| candidates.wall_set(&[p]));

        let enclosed_floor = grid.cell_count() as u64 + 1;
        let mut ranked: Vec<RankedCell> = positions
            .iter()
            .zip(scores)
            .map(|(&position, score)| {
                let importance = if score.escaped {
                    u64::from(baseline.area.saturating_sub(score.area))
                } else {
                    enclosed_floor + u64::from(score.total_score)
                };
                RankedCell {
                    cell: candidates.cell(position),
                    position,
                    importance,
                    score,
                }
            })
            .collect();

        // Stable: equal importance stays in enumeration order.
        ranked.sort_by(|a, b| b.importance.cmp(&a.importance));
        ranked
    }

    /// Returns candidate positions in ranked order.
    pub fn ranked_positions(problem: &Problem) -> Vec<usize> {
        Self::rank(problem).into_iter().map(|r| r.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosure_test::{grid_from_rows, open_grid, single_chokepoint};

    #[test]
    fn test_enclosing_cell_ranks_first() {
        let problem = Problem::new(single_chokepoint());
        let ranked = ChokepointAnalyzer::rank(&problem);

        assert_eq!(ranked.len(), problem.candidates().len());
        assert_eq!(ranked[0].cell, 13);
        assert_eq!(ranked[0].importance, 25 + 1 + 1);
    }

    #[test]
    fn test_cut_off_pocket_outranks_single_cell() {
        // Walling 7 also cuts off the dead end at 2.
        let problem = Problem::new(grid_from_rows(
            &[
                "~~.~~", //
                "~~.~~", //
                "..H..", //
                ".....", //
                ".....",
            ],
            2,
        ));
        let ranked = ChokepointAnalyzer::rank(&problem);

        assert_eq!(ranked[0].cell, 7);
        assert_eq!(ranked[0].importance, 2);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let problem = Problem::new(open_grid(3, 3, 1));
        let ranked = ChokepointAnalyzer::rank(&problem);

        // Every single wall removes exactly its own cell.
        assert!(ranked.iter().all(|r| r.importance == 1));
        let positions: Vec<usize> = ranked.iter().map(|r| r.position).collect();
        assert_eq!(positions, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_better_enclosures_rank_higher() {
        // Either 7 or 9 encloses, but walling 9 keeps the cherry at 8.
        let problem = Problem::new(grid_from_rows(
            &[
                "~~~~~", //
                "~H.C.", //
                "~~~~~",
            ],
            1,
        ));
        let ranked = ChokepointAnalyzer::rank(&problem);

        assert_eq!(ranked[0].cell, 9);
        assert_eq!(ranked[0].score.total_score, 3 + 3);
        assert_eq!(ranked[1].cell, 7);
        assert_eq!(ranked[1].score.total_score, 1);
    }
}
