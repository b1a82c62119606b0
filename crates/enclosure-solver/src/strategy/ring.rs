//! Combination search over distance rings around the start.

use smallvec::SmallVec;
use tracing::debug;

use enclosure_config::RingConfig;
use enclosure_core::EnclosureScore;

use super::Strategy;
use crate::parallel::{best_index, score_batch};
use crate::scope::SearchScope;

type Positions = SmallVec<[usize; 16]>;

/// Tries every `num_walls` combination of the candidates nearest each ring.
///
/// Candidates are ordered by Manhattan distance to the start, ties in
/// enumeration order. For each radius `d` from 1 up to half the shorter grid
/// side, the ring holds the candidates at distance `d` to `d + 2`; rings with
/// fewer than `num_walls` members are skipped. Combinations over the first
/// `window` members are scored in parallel batches.
#[derive(Debug, Clone)]
pub struct RingStrategy {
    window: usize,
    batch_size: usize,
}

impl RingStrategy {
    pub fn new() -> Self {
        Self::from_config(&RingConfig::default())
    }

    pub fn from_config(config: &RingConfig) -> Self {
        Self {
            window: config.window,
            batch_size: config.batch_size,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Candidate positions of each ring, nearest first.
    fn rings(scope: &SearchScope<'_>) -> Vec<(usize, Vec<usize>)> {
        let grid = scope.grid();
        let candidates = scope.candidates();
        let start = grid.start();

        let mut by_distance: Vec<(usize, usize)> = (0..candidates.len())
            .map(|position| (grid.manhattan(start, candidates.cell(position)), position))
            .collect();
        by_distance.sort_by_key(|&(distance, _)| distance);

        let max_radius = grid.cols().min(grid.rows()) / 2;
        (1..max_radius)
            .map(|radius| {
                let members = by_distance
                    .iter()
                    .filter(|&&(distance, _)| distance >= radius && distance <= radius + 2)
                    .map(|&(_, position)| position)
                    .collect();
                (radius, members)
            })
            .collect()
    }
}

impl Default for RingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RingStrategy {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn solve(&self, scope: &SearchScope<'_>) {
        let k = scope.problem().num_walls();
        if k == 0 {
            return;
        }
        let grid = scope.grid();
        let candidates = scope.candidates();
        let batch_size = self.batch_size.max(1);
        let mut best: Option<EnclosureScore> = None;

        for (radius, ring) in Self::rings(scope) {
            if ring.len() < k {
                continue;
            }
            let members = &ring[..ring.len().min(self.window.max(k))];
            let mut combinations = Combinations::new(members.len(), k);

            loop {
                if scope.is_terminated() {
                    return;
                }
                let batch: Vec<Positions> = combinations
                    .by_ref()
                    .take(batch_size)
                    .map(|indices| indices.iter().map(|&i| members[i]).collect())
                    .collect();
                if batch.is_empty() {
                    break;
                }

                let scores = score_batch(grid, &batch, |positions| candidates.wall_set(positions));
                scope.add_iterations(batch.len() as u64);
                if let Some(leader) = best_index(&scores) {
                    if best.map_or(true, |best| scores[leader] > best) {
                        best = Some(scores[leader]);
                        scope.offer(&candidates.wall_set(&batch[leader]), scores[leader]);
                    }
                }
            }

            debug!(
                event = "ring_end",
                radius,
                members = ring.len(),
                best = best.map_or(0, |best| best.total_score),
            );
        }
    }
}

/// Lexicographic `k`-combinations of `0..n`.
#[derive(Debug)]
struct Combinations {
    n: usize,
    indices: Positions,
    fresh: bool,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            fresh: true,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Positions;

    fn next(&mut self) -> Option<Positions> {
        if self.done {
            return None;
        }
        if self.fresh {
            self.fresh = false;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::termination::IterationCountTermination;
    use enclosure_test::open_grid;

    #[test]
    fn test_combinations_lexicographic() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).map(|c| c.to_vec()).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_combinations_edge_sizes() {
        assert_eq!(Combinations::new(5, 5).count(), 1);
        assert_eq!(Combinations::new(3, 4).count(), 0);
        assert_eq!(Combinations::new(20, 4).count(), 4845);
    }

    #[test]
    fn test_encloses_start_with_nearest_ring() {
        let problem = Problem::new(open_grid(7, 7, 4));
        let outcome = RingStrategy::new().run(&problem, 0);

        assert_eq!(outcome.walls.cells(), &[17, 23, 25, 31]);
        assert_eq!(outcome.total_score(), 1);
        // Radii 1 and 2, each capped at the 20 nearest members.
        assert_eq!(outcome.iterations, 2 * 4845);
    }

    #[test]
    fn test_small_rings_are_skipped() {
        // A 5x5 grid has a single ring of 20 candidates.
        let problem = Problem::new(open_grid(5, 5, 21));
        let outcome = RingStrategy::new().run(&problem, 0);

        assert_eq!(outcome.iterations, 0);
        assert!(outcome.walls.is_empty());
    }

    #[test]
    fn test_window_never_below_wall_count() {
        let problem = Problem::new(open_grid(5, 5, 4));
        let outcome = RingStrategy::new().with_window(1).run(&problem, 0);

        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.total_score(), 1);
    }

    #[test]
    fn test_termination_between_batches() {
        let problem = Problem::new(open_grid(7, 7, 4));
        let termination = IterationCountTermination::new(1);
        let strategy = RingStrategy::new().with_batch_size(10);

        let scope = SearchScope::new(&problem, strategy.name(), 0).with_termination(&termination);
        strategy.solve(&scope);
        assert_eq!(scope.into_outcome().iterations, 10);
    }
}
