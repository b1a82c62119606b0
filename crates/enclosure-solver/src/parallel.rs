//! Parallel oracle evaluation.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::warn;

use enclosure_config::ThreadCount;
use enclosure_core::{EnclosureScore, Grid, ReachabilityOracle, WallSet};

/// Scores a batch of trial placements in parallel.
///
/// Each rayon worker owns one oracle; the grid is shared read-only. Results
/// come back in input order.
pub fn score_batch<T, F>(grid: &Grid, items: &[T], walls_of: F) -> Vec<EnclosureScore>
where
    T: Sync,
    F: Fn(&T) -> WallSet + Sync + Send,
{
    items
        .par_iter()
        .map_init(
            || ReachabilityOracle::new(grid),
            |oracle, item| oracle.score(grid, &walls_of(item)),
        )
        .collect()
}

/// Returns the index of the best score, the first one on ties.
pub fn best_index(scores: &[EnclosureScore]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, score) in scores.iter().enumerate() {
        match best {
            Some(current) if *score <= scores[current] => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Runs `op` with the configured degree of parallelism.
///
/// `Auto` uses rayon's global pool. Otherwise a dedicated pool is built; if
/// that fails the global pool is used and a warning logged.
pub fn with_thread_count<R, OP>(thread_count: ThreadCount, op: OP) -> R
where
    R: Send,
    OP: FnOnce() -> R + Send,
{
    let threads = match thread_count {
        ThreadCount::Auto => return op(),
        ThreadCount::None => 1,
        ThreadCount::Count(n) => n.max(1),
    };
    match ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(op),
        Err(err) => {
            warn!(event = "thread_pool_failed", threads, error = %err);
            op()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosure_core::{evaluate, CandidateSet};

    #[test]
    fn test_score_batch_matches_sequential() {
        let grid = Grid::builder(6, 6).start(14).budget(2).build().unwrap();
        let candidates = CandidateSet::new(&grid);
        let pairs: Vec<[usize; 2]> = (0..candidates.len() - 1).map(|p| [p, p + 1]).collect();

        let scores = score_batch(&grid, &pairs, |pair| candidates.wall_set(pair));
        for (pair, score) in pairs.iter().zip(&scores) {
            assert_eq!(*score, evaluate(&grid, &candidates.wall_set(pair)).score());
        }
    }

    #[test]
    fn test_best_index_prefers_first_on_ties() {
        let enclosed = EnclosureScore::from_counts(false, 3, 0);
        let escaped = EnclosureScore::from_counts(true, 9, 0);
        assert_eq!(best_index(&[escaped, enclosed, enclosed]), Some(1));
        assert_eq!(best_index(&[]), None);
    }

    #[test]
    fn test_dedicated_pool_runs_op() {
        let threads = with_thread_count(ThreadCount::Count(2), rayon::current_num_threads);
        assert_eq!(threads, 2);
        let single = with_thread_count(ThreadCount::None, rayon::current_num_threads);
        assert_eq!(single, 1);
    }
}
