//! Simulated annealing with concurrent restarts.

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use enclosure_config::AnnealingConfig;
use enclosure_core::{EnclosureScore, ReachabilityOracle, WallSet};

use super::Strategy;
use crate::genes;
use crate::scope::SearchScope;

/// Simulated annealing acceptor - accepts worsening moves with a
/// temperature-based probability.
///
/// Starts with high acceptance probability and gradually decreases it,
/// allowing the search to escape local optima early on.
///
/// # Example
///
/// ```
/// use enclosure_solver::SimulatedAnnealingAcceptor;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let mut acceptor = SimulatedAnnealingAcceptor::new(10.0, 0.5);
///
/// assert!(acceptor.is_accepted(1.0, &mut rng));
/// acceptor.step_ended();
/// assert_eq!(acceptor.temperature(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    /// Initial temperature.
    starting_temperature: f64,
    /// Current temperature.
    current_temperature: f64,
    /// Temperature decay rate per step.
    decay_rate: f64,
    /// At or below this temperature only improving moves are accepted.
    min_temperature: f64,
}

impl SimulatedAnnealingAcceptor {
    /// Creates a new simulated annealing acceptor.
    ///
    /// # Arguments
    /// * `starting_temperature` - Initial temperature (higher = more exploration)
    /// * `decay_rate` - Multiplicative decay per step (e.g., 0.9999)
    pub fn new(starting_temperature: f64, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            min_temperature: 0.0,
        }
    }

    pub fn with_min_temperature(mut self, min_temperature: f64) -> Self {
        self.min_temperature = min_temperature;
        self
    }

    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Accepts improvements always; a move that changes the score by
    /// `delta <= 0` is accepted with probability `exp(delta / temperature)`.
    pub fn is_accepted<R: Rng + ?Sized>(&self, delta: f64, rng: &mut R) -> bool {
        if delta > 0.0 {
            return true;
        }
        if self.current_temperature <= self.min_temperature {
            return false;
        }
        let probability = (delta / self.current_temperature).exp();
        rng.random::<f64>() < probability
    }

    /// Resets the temperature for a new restart.
    pub fn restart(&mut self) {
        self.current_temperature = self.starting_temperature;
    }

    pub fn step_ended(&mut self) {
        self.current_temperature *= self.decay_rate;
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(10.0, 0.9999)
    }
}

/// Annealing energy of a score.
///
/// Enclosures are worth their total score. Escaping placements all score 0,
/// so they are ranked by the share of the grid they leave reachable, which
/// stays within (-1, 0] and below any enclosure.
fn energy(score: &EnclosureScore, cell_count: usize) -> f64 {
    if score.escaped {
        -(score.area as f64) / cell_count as f64
    } else {
        score.total_score as f64
    }
}

/// Simulated annealing over `num_walls`-sized placements.
///
/// A neighbour swaps 1 to 3 walls for unused candidates. Restarts run
/// concurrently, each from a fresh random placement on its own random
/// stream; the first restart may instead start from a warm-start placement.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealingStrategy {
    config: AnnealingConfig,
    warm_start: Option<WallSet>,
}

impl SimulatedAnnealingStrategy {
    pub fn new(config: AnnealingConfig) -> Self {
        Self {
            config,
            warm_start: None,
        }
    }

    /// Starts the first restart from `walls` instead of a random placement.
    ///
    /// Short placements are padded with random candidates.
    pub fn with_warm_start(mut self, walls: WallSet) -> Self {
        self.warm_start = Some(walls);
        self
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    fn anneal(&self, scope: &SearchScope<'_>, restart: usize) {
        let config = &self.config;
        let grid = scope.grid();
        let candidates = scope.candidates();
        let n = candidates.len();
        let k = scope.problem().num_walls();
        let mut rng = scope.rng(restart as u64);
        let mut oracle = ReachabilityOracle::new(grid);

        let mut current = match (&self.warm_start, restart) {
            (Some(walls), 0) => {
                let mut genes = candidates.positions_of(walls);
                genes.truncate(k);
                let missing = k - genes.len();
                genes::add_unused(&mut rng, &mut genes, n, missing);
                genes
            }
            _ => genes::random_positions(&mut rng, n, k),
        };
        let mut current_score = oracle.score(grid, &candidates.wall_set(&current));
        let mut best_score = current_score;
        scope.offer(&candidates.wall_set(&current), current_score);

        let mut acceptor = SimulatedAnnealingAcceptor::new(
            config.starting_temperature,
            config.cooling_rate,
        )
        .with_min_temperature(config.min_temperature);
        acceptor.restart();

        let mut accepted = 0u64;
        for _ in 0..config.iterations {
            if scope.is_terminated() {
                break;
            }

            let trial = genes::neighbor(&mut rng, &current, n);
            let trial_score = oracle.score(grid, &candidates.wall_set(&trial));
            scope.increment_iterations();

            let delta = energy(&trial_score, grid.cell_count()) - energy(&current_score, grid.cell_count());
            if acceptor.is_accepted(delta, &mut rng) {
                accepted += 1;
                current = trial;
                current_score = trial_score;
                if current_score > best_score {
                    best_score = current_score;
                    scope.offer(&candidates.wall_set(&current), best_score);
                }
            }
            acceptor.step_ended();
        }

        debug!(
            event = "restart_end",
            restart,
            accepted,
            temperature = acceptor.temperature(),
            best = best_score.total_score,
        );
    }
}

impl Strategy for SimulatedAnnealingStrategy {
    fn name(&self) -> &'static str {
        "simulated_annealing"
    }

    fn solve(&self, scope: &SearchScope<'_>) {
        if scope.problem().num_walls() == 0 {
            return;
        }
        (0..self.config.restarts.max(1))
            .into_par_iter()
            .for_each(|restart| self.anneal(scope, restart));
    }
}
