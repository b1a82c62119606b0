//! Genetic search over fixed-size wall placements.

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use enclosure_config::GeneticConfig;
use enclosure_core::EnclosureScore;

use super::{ChokepointAnalyzer, Strategy};
use crate::genes;
use crate::parallel::{best_index, score_batch};
use crate::scope::SearchScope;

/// Evolves populations of `num_walls`-sized placements.
///
/// Fitness is the enclosure score. Each generation keeps an elite, fills
/// most of the rest with mutated crossover children of tournament winners,
/// and replaces a fraction with fresh random immigrants. Populations are
/// scored in parallel; several islands may evolve concurrently, each on its
/// own random stream.
#[derive(Debug, Clone, Default)]
pub struct GeneticStrategy {
    config: GeneticConfig,
}

impl GeneticStrategy {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    fn evolve(&self, scope: &SearchScope<'_>, island: usize, ranked: &[usize]) {
        let config = &self.config;
        let grid = scope.grid();
        let candidates = scope.candidates();
        let n = candidates.len();
        let k = scope.problem().num_walls();
        let size = config.population_size.max(2);
        let mut rng = scope.rng(island as u64);

        let seeded = if ranked.is_empty() {
            0
        } else {
            fraction_of(size, config.chokepoint_seed_fraction)
        };
        let mut population: Vec<Vec<usize>> = (0..size)
            .map(|i| {
                if i == 0 && seeded > 0 {
                    let mut top = ranked[..k.min(ranked.len())].to_vec();
                    top.sort_unstable();
                    top
                } else if i < seeded {
                    genes::seeded_positions(&mut rng, ranked, n, k)
                } else {
                    genes::random_positions(&mut rng, n, k)
                }
            })
            .collect();
        let mut fitness = score_batch(grid, &population, |g| candidates.wall_set(g));

        let Some(first) = best_index(&fitness) else {
            return;
        };
        let mut best_score = fitness[first];
        scope.offer(&candidates.wall_set(&population[first]), best_score);

        let elites = fraction_of(size, config.elite_fraction);
        let immigrants = fraction_of(size, config.immigrant_fraction).min(size - elites);

        for generation in 0..config.generations {
            if scope.is_terminated() {
                break;
            }

            let mut order: Vec<usize> = (0..size).collect();
            order.sort_by(|&a, &b| fitness[b].cmp(&fitness[a]));

            let mut next: Vec<Vec<usize>> = Vec::with_capacity(size);
            next.extend(order[..elites].iter().map(|&i| population[i].clone()));
            while next.len() < size - immigrants {
                let a = tournament(&mut rng, &fitness, config.tournament_size);
                let b = tournament(&mut rng, &fitness, config.tournament_size);
                let mut child = genes::crossover(&mut rng, &population[a], &population[b], n, k);
                // Rates above 1 always mutate, negative rates never do.
                if rng.random::<f64>() < config.mutation_rate {
                    genes::mutate(&mut rng, &mut child, n);
                }
                next.push(child);
            }
            while next.len() < size {
                next.push(genes::random_positions(&mut rng, n, k));
            }

            population = next;
            fitness = score_batch(grid, &population, |g| candidates.wall_set(g));
            scope.increment_iterations();

            if let Some(leader) = best_index(&fitness) {
                if fitness[leader] > best_score {
                    best_score = fitness[leader];
                    scope.offer(&candidates.wall_set(&population[leader]), best_score);
                }
            }
            debug!(
                event = "generation",
                island,
                generation,
                best = best_score.total_score,
            );
        }
    }
}

fn fraction_of(size: usize, fraction: f64) -> usize {
    ((size as f64 * fraction).round() as usize).min(size)
}

/// Returns the fittest of `rounds` uniformly drawn individuals.
fn tournament<R: Rng + ?Sized>(rng: &mut R, fitness: &[EnclosureScore], rounds: usize) -> usize {
    let mut winner = rng.random_range(0..fitness.len());
    for _ in 1..rounds.max(1) {
        let challenger = rng.random_range(0..fitness.len());
        if fitness[challenger] > fitness[winner] {
            winner = challenger;
        }
    }
    winner
}

impl Strategy for GeneticStrategy {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn solve(&self, scope: &SearchScope<'_>) {
        if scope.problem().num_walls() == 0 {
            return;
        }

        let ranked = if self.config.chokepoint_seed_fraction > 0.0 {
            ChokepointAnalyzer::ranked_positions(scope.problem())
        } else {
            Vec::new()
        };

        (0..self.config.runs.max(1))
            .into_par_iter()
            .for_each(|island| self.evolve(scope, island, &ranked));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::termination::IterationCountTermination;
    use enclosure_test::{cherry_pocket, open_grid, single_chokepoint};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> GeneticConfig {
        GeneticConfig {
            population_size: 40,
            generations: 30,
            ..GeneticConfig::default()
        }
    }

    #[test]
    fn test_finds_an_enclosure() {
        // Every 3-wall placement containing 13 encloses.
        let problem = Problem::new(single_chokepoint());
        let outcome = GeneticStrategy::new(small_config()).run(&problem, 7);

        assert!(outcome.is_enclosed());
        assert_eq!(outcome.walls.len(), 3);
        assert_eq!(outcome.score, problem.evaluate(&outcome.walls).score());
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let problem = Problem::new(cherry_pocket());
        let config = GeneticConfig {
            runs: 2,
            ..small_config()
        };
        let first = GeneticStrategy::new(config.clone()).run(&problem, 99);
        let second = GeneticStrategy::new(config).run(&problem, 99);

        assert_eq!(first.score, second.score);
        assert_eq!(first.walls, second.walls);
    }

    #[test]
    fn test_generations_are_counted() {
        let problem = Problem::new(open_grid(7, 7, 4));
        let config = GeneticConfig {
            runs: 3,
            ..small_config()
        };
        let outcome = GeneticStrategy::new(config).run(&problem, 1);
        assert_eq!(outcome.iterations, 3 * 30);
    }

    #[test]
    fn test_termination_stops_evolution() {
        let problem = Problem::new(open_grid(7, 7, 4));
        let termination = IterationCountTermination::new(5);
        let strategy = GeneticStrategy::new(small_config());

        let scope = SearchScope::new(&problem, strategy.name(), 3).with_termination(&termination);
        strategy.solve(&scope);
        assert_eq!(scope.into_outcome().iterations, 5);
    }

    #[test]
    fn test_chokepoint_seeding() {
        let problem = Problem::new(single_chokepoint());
        let config = GeneticConfig {
            population_size: 10,
            generations: 0,
            chokepoint_seed_fraction: 1.0,
            ..GeneticConfig::default()
        };
        // No generations: only the initial population is scored, and its
        // first individual holds the top-ranked cells, 13 included.
        let outcome = GeneticStrategy::new(config).run(&problem, 5);
        assert!(outcome.is_enclosed());
    }

    #[test]
    fn test_out_of_range_mutation_rate_still_runs() {
        let problem = Problem::new(single_chokepoint());
        for mutation_rate in [1.5, -0.5] {
            let config = GeneticConfig {
                mutation_rate,
                generations: 5,
                ..small_config()
            };
            let outcome = GeneticStrategy::new(config).run(&problem, 4);
            assert_eq!(outcome.iterations, 5);
        }
    }

    #[test]
    fn test_zero_budget() {
        let problem = Problem::new(open_grid(5, 5, 0));
        let outcome = GeneticStrategy::new(small_config()).run(&problem, 0);
        assert!(outcome.walls.is_empty());
        assert_eq!(outcome.total_score(), 0);
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let weak = EnclosureScore::from_counts(true, 10, 0);
        let strong = EnclosureScore::from_counts(false, 4, 0);
        let fitness = [weak, weak, strong, weak];

        // With many rounds the strong individual is all but certain to appear.
        let winner = tournament(&mut rng, &fitness, 64);
        assert_eq!(winner, 2);
        assert!(tournament(&mut rng, &fitness, 1) < 4);
    }

    #[test]
    fn test_fraction_of() {
        assert_eq!(fraction_of(200, 0.05), 10);
        assert_eq!(fraction_of(10, 0.0), 0);
        assert_eq!(fraction_of(10, 1.0), 10);
    }
}
