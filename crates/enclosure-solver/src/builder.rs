//! Builder module for constructing strategies from configuration
//!
//! This module provides the wiring between configuration types and
//! the strategy implementations.

use enclosure_config::{ConfigError, SearchConfig, StrategyConfig};

use crate::event::SearchEvents;
use crate::solver::Solver;
use crate::strategy::{
    ExhaustiveStrategy, GeneticStrategy, GreedyStrategy, RandomStrategy, RingStrategy,
    SimulatedAnnealingStrategy, Strategy,
};
use crate::termination;

/// Builder for constructing strategies and solvers from configuration.
///
/// Every entry point validates its input first, so configurations built in
/// code get the same checks as loaded ones.
pub struct StrategyBuilder;

impl StrategyBuilder {
    /// Builds a strategy from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` is out of range.
    pub fn build(config: &StrategyConfig) -> Result<Box<dyn Strategy>, ConfigError> {
        config.validate()?;
        Ok(match config {
            StrategyConfig::Greedy(_) => Box::new(GreedyStrategy),
            StrategyConfig::Genetic(genetic) => Box::new(GeneticStrategy::new(genetic.clone())),
            StrategyConfig::SimulatedAnnealing(annealing) => {
                Box::new(SimulatedAnnealingStrategy::new(annealing.clone()))
            }
            StrategyConfig::Exhaustive(exhaustive) => {
                Box::new(ExhaustiveStrategy::from_config(exhaustive))
            }
            StrategyConfig::Ring(ring) => Box::new(RingStrategy::from_config(ring)),
            StrategyConfig::Random(random) => Box::new(RandomStrategy::from_config(random)),
        })
    }

    /// Builds a solver for one configured strategy.
    ///
    /// The strategy's termination override is laid over the global one; the
    /// seed and thread count come from `search`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `search` or `config` is out of
    /// range.
    pub fn solver(search: &SearchConfig, config: &StrategyConfig) -> Result<Solver, ConfigError> {
        search.validate()?;
        Self::solver_unchecked(search, config)
    }

    /// Builds one solver per configured strategy, sharing `events`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first out-of-range option.
    pub fn solvers(
        search: &SearchConfig,
        events: &SearchEvents,
    ) -> Result<Vec<Solver>, ConfigError> {
        search.validate()?;
        search
            .strategies
            .iter()
            .map(|config| {
                let solver = Self::solver_unchecked(search, config)?;
                Ok(solver.with_events(events.clone()))
            })
            .collect()
    }

    fn solver_unchecked(
        search: &SearchConfig,
        config: &StrategyConfig,
    ) -> Result<Solver, ConfigError> {
        let mut solver = Solver::from_boxed(Self::build(config)?)
            .with_thread_count(search.thread_count)
            .with_termination(termination::from_config(&search.termination_for(config)));
        if let Some(seed) = search.random_seed {
            solver = solver.with_random_seed(seed);
        }
        Ok(solver)
    }

    /// The strategies run when a configuration lists none.
    pub fn default_strategies() -> Vec<StrategyConfig> {
        vec![
            StrategyConfig::Greedy(Default::default()),
            StrategyConfig::Genetic(Default::default()),
            StrategyConfig::SimulatedAnnealing(Default::default()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use enclosure_config::{
        AnnealingConfig, ExhaustiveConfig, GeneticConfig, TerminationConfig, ThreadCount,
    };
    use enclosure_test::{lake, single_chokepoint};

    #[test]
    fn test_builds_every_strategy_type() {
        let configs = [
            ("greedy", StrategyConfig::Greedy(Default::default())),
            ("genetic", StrategyConfig::Genetic(Default::default())),
            (
                "simulated_annealing",
                StrategyConfig::SimulatedAnnealing(Default::default()),
            ),
            ("exhaustive", StrategyConfig::Exhaustive(Default::default())),
            ("ring", StrategyConfig::Ring(Default::default())),
            ("random", StrategyConfig::Random(Default::default())),
        ];
        for (name, config) in configs {
            assert_eq!(StrategyBuilder::build(&config).unwrap().name(), name);
            assert_eq!(config.name(), name);
        }
    }

    #[test]
    fn test_solver_uses_search_settings() {
        let search = SearchConfig::new().with_random_seed(5);
        let config = StrategyConfig::Exhaustive(ExhaustiveConfig::default());

        let outcome = StrategyBuilder::solver(&search, &config)
            .unwrap()
            .run(&Problem::new(single_chokepoint()));
        assert_eq!(outcome.seed, 5);
        assert!(outcome.proven_optimal);
    }

    #[test]
    fn test_strategy_termination_override() {
        let search = SearchConfig::new().with_random_seed(1);
        let config = StrategyConfig::SimulatedAnnealing(AnnealingConfig {
            iterations: 1_000_000,
            restarts: 1,
            termination: Some(TerminationConfig {
                iteration_limit: Some(50),
                ..TerminationConfig::default()
            }),
            ..AnnealingConfig::default()
        });

        let outcome = StrategyBuilder::solver(&search, &config)
            .unwrap()
            .run(&Problem::new(lake()));
        assert_eq!(outcome.iterations, 50);
    }

    #[test]
    fn test_solvers_follow_configuration_order() {
        let search = SearchConfig::new()
            .with_strategy(StrategyConfig::Ring(Default::default()))
            .with_strategy(StrategyConfig::Greedy(Default::default()));

        let names: Vec<&str> = StrategyBuilder::solvers(&search, &SearchEvents::new())
            .unwrap()
            .iter()
            .map(|solver| solver.name())
            .collect();
        assert_eq!(names, vec!["ring", "greedy"]);
    }

    #[test]
    fn test_rejects_invalid_strategy() {
        let config = StrategyConfig::Genetic(GeneticConfig {
            mutation_rate: 1.5,
            ..GeneticConfig::default()
        });
        let err = StrategyBuilder::build(&config).unwrap_err();
        assert!(err.to_string().contains("mutation_rate"));

        let search = SearchConfig::new().with_strategy(config.clone());
        assert!(StrategyBuilder::solver(&search, &config).is_err());
        assert!(StrategyBuilder::solvers(&search, &SearchEvents::new()).is_err());
    }

    #[test]
    fn test_rejects_invalid_search_settings() {
        let search = SearchConfig::new()
            .with_thread_count(ThreadCount::Count(0))
            .with_strategy(StrategyConfig::Greedy(Default::default()));
        assert!(StrategyBuilder::solver(&search, &search.strategies[0]).is_err());
        assert!(StrategyBuilder::solvers(&search, &SearchEvents::new()).is_err());
    }

    #[test]
    fn test_default_strategies() {
        let names: Vec<&str> = StrategyBuilder::default_strategies()
            .iter()
            .map(|config| config.name())
            .collect();
        assert_eq!(names, vec!["greedy", "genetic", "simulated_annealing"]);
    }
}
