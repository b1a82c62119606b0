//! Benchmark result types.

use std::cmp::Ordering;
use std::time::Duration;

use enclosure_core::{EnclosureScore, WallSet};
use enclosure_solver::SearchOutcome;

/// Result of a single benchmark run.
///
/// Contains timing, score, and placement for one strategy execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRun {
    /// Run index (0-based).
    pub run_index: usize,
    /// Total solve time.
    pub solve_time: Duration,
    /// Final score achieved.
    pub score: EnclosureScore,
    /// Walls of the final placement.
    pub walls: WallSet,
    /// Strategy iterations performed.
    pub iterations: u64,
    /// Number of times the best improved.
    pub improvements: usize,
    pub proven_optimal: bool,
    pub seed: u64,
}

impl BenchmarkRun {
    /// Creates a benchmark run from a search outcome.
    pub fn from_outcome(run_index: usize, outcome: SearchOutcome) -> Self {
        Self {
            run_index,
            solve_time: outcome.elapsed,
            score: outcome.score,
            walls: outcome.walls,
            iterations: outcome.iterations,
            improvements: outcome.improvements.len(),
            proven_optimal: outcome.proven_optimal,
            seed: outcome.seed,
        }
    }

    /// Returns iterations per second.
    ///
    /// # Example
    ///
    /// ```
    /// use enclosure_benchmark::BenchmarkRun;
    /// use enclosure_core::{EnclosureScore, WallSet};
    /// use std::time::Duration;
    ///
    /// let run = BenchmarkRun {
    ///     run_index: 0,
    ///     solve_time: Duration::from_secs(2),
    ///     score: EnclosureScore::default(),
    ///     walls: WallSet::empty(),
    ///     iterations: 1000,
    ///     improvements: 3,
    ///     proven_optimal: false,
    ///     seed: 0,
    /// };
    ///
    /// assert!((run.iterations_per_second() - 500.0).abs() < 0.001);
    /// ```
    pub fn iterations_per_second(&self) -> f64 {
        if self.solve_time.is_zero() {
            0.0
        } else {
            self.iterations as f64 / self.solve_time.as_secs_f64()
        }
    }
}

/// Aggregated results of one strategy across measurement runs.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Benchmark name.
    pub name: String,
    /// Strategy name.
    pub strategy_name: String,
    /// Problem instance name.
    pub problem_name: String,
    /// Individual runs.
    pub runs: Vec<BenchmarkRun>,
}

impl BenchmarkResult {
    /// Creates a new benchmark result.
    pub fn new(
        name: impl Into<String>,
        strategy_name: impl Into<String>,
        problem_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            strategy_name: strategy_name.into(),
            problem_name: problem_name.into(),
            runs: Vec::new(),
        }
    }

    pub fn add_run(&mut self, run: BenchmarkRun) {
        self.runs.push(run);
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Returns the best run: highest score, then shortest solve time, then
    /// earliest.
    pub fn best_run(&self) -> Option<&BenchmarkRun> {
        // min_by keeps the first of equal runs.
        self.runs.iter().min_by(|a, b| compare_runs(a, b))
    }

    /// Returns the best score across all runs.
    pub fn best_score(&self) -> Option<EnclosureScore> {
        self.runs.iter().map(|r| r.score).max()
    }

    /// Returns the worst score across all runs.
    pub fn worst_score(&self) -> Option<EnclosureScore> {
        self.runs.iter().map(|r| r.score).min()
    }

    /// Returns the mean total score.
    ///
    /// # Example
    ///
    /// ```
    /// use enclosure_benchmark::{BenchmarkResult, BenchmarkRun};
    /// use enclosure_core::{EnclosureScore, WallSet};
    /// use std::time::Duration;
    ///
    /// let run = |run_index, area| BenchmarkRun {
    ///     run_index,
    ///     solve_time: Duration::from_millis(100),
    ///     score: EnclosureScore::from_counts(false, area, 0),
    ///     walls: WallSet::empty(),
    ///     iterations: 10,
    ///     improvements: 1,
    ///     proven_optimal: false,
    ///     seed: 0,
    /// };
    ///
    /// let mut result = BenchmarkResult::new("Test", "greedy", "lake");
    /// result.add_run(run(0, 4));
    /// result.add_run(run(1, 7));
    /// assert_eq!(result.avg_total_score(), 5.5);
    /// assert_eq!(result.best_score().unwrap().total_score, 7);
    /// ```
    pub fn avg_total_score(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let total: u64 = self.runs.iter().map(|r| u64::from(r.score.total_score)).sum();
        total as f64 / self.runs.len() as f64
    }

    /// Returns the average solve time.
    pub fn avg_solve_time(&self) -> Duration {
        if self.runs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.runs.iter().map(|r| r.solve_time).sum();
        total / self.runs.len() as u32
    }

    /// Returns the minimum solve time.
    pub fn min_solve_time(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.solve_time)
            .min()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the maximum solve time.
    pub fn max_solve_time(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.solve_time)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the average iterations per second.
    pub fn avg_iterations_per_second(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let total: f64 = self.runs.iter().map(|r| r.iterations_per_second()).sum();
        total / self.runs.len() as f64
    }
}

/// Orders runs best first: higher score, then shorter solve time.
pub(crate) fn compare_runs(a: &BenchmarkRun, b: &BenchmarkRun) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.solve_time.cmp(&b.solve_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(run_index: usize, area: u32, millis: u64) -> BenchmarkRun {
        BenchmarkRun {
            run_index,
            solve_time: Duration::from_millis(millis),
            score: EnclosureScore::from_counts(false, area, 0),
            walls: WallSet::empty(),
            iterations: 100,
            improvements: 1,
            proven_optimal: false,
            seed: run_index as u64,
        }
    }

    #[test]
    fn test_best_run_prefers_score_then_time() {
        let mut result = BenchmarkResult::new("Test", "genetic", "lake");
        result.add_run(run(0, 5, 30));
        result.add_run(run(1, 9, 50));
        result.add_run(run(2, 9, 20));

        assert_eq!(result.best_run().map(|r| r.run_index), Some(2));
        assert_eq!(result.worst_score().map(|s| s.total_score), Some(5));
    }

    #[test]
    fn test_solve_time_aggregates() {
        let mut result = BenchmarkResult::new("Test", "genetic", "lake");
        result.add_run(run(0, 1, 100));
        result.add_run(run(1, 1, 300));

        assert_eq!(result.avg_solve_time(), Duration::from_millis(200));
        assert_eq!(result.min_solve_time(), Duration::from_millis(100));
        assert_eq!(result.max_solve_time(), Duration::from_millis(300));
        assert!((result.avg_iterations_per_second() - (1000.0 + 1000.0 / 3.0) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_result() {
        let result = BenchmarkResult::new("Test", "ring", "lake");
        assert!(result.best_run().is_none());
        assert!(result.best_score().is_none());
        assert_eq!(result.avg_total_score(), 0.0);
        assert_eq!(result.avg_solve_time(), Duration::ZERO);
    }
}
