//! Uniform random sampling.

use enclosure_config::RandomConfig;
use enclosure_core::EnclosureScore;

use super::Strategy;
use crate::genes;
use crate::parallel::{best_index, score_batch};
use crate::scope::SearchScope;

/// Scores `samples` uniformly drawn `num_walls`-sized placements.
///
/// Samples are drawn sequentially from one random stream and scored in
/// parallel batches, so the outcome depends only on the seed.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    samples: u64,
    batch_size: usize,
}

impl RandomStrategy {
    pub fn new(samples: u64) -> Self {
        Self {
            samples,
            batch_size: RandomConfig::default().batch_size,
        }
    }

    pub fn from_config(config: &RandomConfig) -> Self {
        Self {
            samples: config.samples,
            batch_size: config.batch_size,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::from_config(&RandomConfig::default())
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn solve(&self, scope: &SearchScope<'_>) {
        let k = scope.problem().num_walls();
        if k == 0 {
            return;
        }
        let grid = scope.grid();
        let candidates = scope.candidates();
        let n = candidates.len();
        let mut rng = scope.rng(0);
        let mut best: Option<EnclosureScore> = None;
        let mut drawn = 0u64;

        while drawn < self.samples {
            if scope.is_terminated() {
                break;
            }
            let take = (self.samples - drawn).min(self.batch_size.max(1) as u64) as usize;
            let batch: Vec<Vec<usize>> = (0..take)
                .map(|_| genes::random_positions(&mut rng, n, k))
                .collect();

            let scores = score_batch(grid, &batch, |positions| candidates.wall_set(positions));
            scope.add_iterations(take as u64);
            drawn += take as u64;

            if let Some(leader) = best_index(&scores) {
                if best.map_or(true, |best| scores[leader] > best) {
                    best = Some(scores[leader]);
                    scope.offer(&candidates.wall_set(&batch[leader]), scores[leader]);
                }
            }
        }
    }
}
