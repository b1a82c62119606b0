//! Configuration system for enclosure search.
//!
//! Load search configuration from TOML or YAML to pick strategies, tune them
//! and bound them in time without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use enclosure_config::{SearchConfig, StrategyConfig};
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 10
//!
//!     [[strategies]]
//!     type = "greedy"
//!
//!     [[strategies]]
//!     type = "simulated_annealing"
//!     restarts = 8
//!     cooling_rate = 0.999
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
//! assert_eq!(config.strategies.len(), 2);
//! assert!(matches!(config.strategies[1], StrategyConfig::SimulatedAnnealing(_)));
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use enclosure_config::SearchConfig;
//!
//! let config = SearchConfig::load("enclosure.toml").unwrap_or_default();
//! assert!(config.strategies.is_empty());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Worker threads for parallel oracle evaluation.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Termination applied to every strategy unless overridden.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Strategies to run, in order.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the worker thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Adds a strategy.
    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Returns the global time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the termination for one strategy: its own override laid over
    /// the global termination.
    pub fn termination_for(&self, strategy: &StrategyConfig) -> TerminationConfig {
        let global = self.termination.clone().unwrap_or_default();
        match strategy.termination() {
            Some(local) => global.overlay(local),
            None => global,
        }
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ThreadCount::Count(0) = self.thread_count {
            return Err(ConfigError::Invalid("thread_count must be positive".into()));
        }
        for strategy in &self.strategies {
            strategy.validate()?;
        }
        Ok(())
    }
}

/// Worker thread configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// One worker per available core.
    #[default]
    Auto,

    /// Evaluate on the calling thread only.
    None,

    /// Specific number of threads.
    Count(usize),
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of strategy iterations.
    pub iteration_limit: Option<u64>,

    /// Maximum iterations without a new best before terminating.
    pub unimproved_iteration_limit: Option<u64>,

    /// Stop once this total score is reached (e.g. a known optimum).
    pub best_score_limit: Option<u32>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Returns true if no limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none()
            && self.iteration_limit.is_none()
            && self.unimproved_iteration_limit.is_none()
            && self.best_score_limit.is_none()
    }

    /// Returns `self` with every limit set in `other` replaced.
    pub fn overlay(&self, other: &TerminationConfig) -> TerminationConfig {
        // Time limits are replaced as a pair so a local millis limit does not
        // add to a global seconds limit.
        let (seconds, millis) = if other.time_limit().is_some() {
            (other.seconds_spent_limit, other.millis_spent_limit)
        } else {
            (self.seconds_spent_limit, self.millis_spent_limit)
        };
        TerminationConfig {
            seconds_spent_limit: seconds,
            millis_spent_limit: millis,
            iteration_limit: other.iteration_limit.or(self.iteration_limit),
            unimproved_iteration_limit: other
                .unimproved_iteration_limit
                .or(self.unimproved_iteration_limit),
            best_score_limit: other.best_score_limit.or(self.best_score_limit),
        }
    }
}

/// Strategy configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Greedy wall-by-wall construction.
    Greedy(GreedyConfig),

    /// Genetic search over fixed-size wall sets.
    Genetic(GeneticConfig),

    /// Simulated annealing with restarts.
    SimulatedAnnealing(AnnealingConfig),

    /// Budgeted exhaustive enumeration.
    Exhaustive(ExhaustiveConfig),

    /// Combinations of cells in rings around the start.
    Ring(RingConfig),

    /// Uniform random sampling.
    Random(RandomConfig),
}

impl StrategyConfig {
    /// Returns the strategy type name.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::Greedy(_) => "greedy",
            StrategyConfig::Genetic(_) => "genetic",
            StrategyConfig::SimulatedAnnealing(_) => "simulated_annealing",
            StrategyConfig::Exhaustive(_) => "exhaustive",
            StrategyConfig::Ring(_) => "ring",
            StrategyConfig::Random(_) => "random",
        }
    }

    /// Returns the strategy's own termination override.
    pub fn termination(&self) -> Option<&TerminationConfig> {
        match self {
            StrategyConfig::Greedy(c) => c.termination.as_ref(),
            StrategyConfig::Genetic(c) => c.termination.as_ref(),
            StrategyConfig::SimulatedAnnealing(c) => c.termination.as_ref(),
            StrategyConfig::Exhaustive(c) => c.termination.as_ref(),
            StrategyConfig::Ring(c) => c.termination.as_ref(),
            StrategyConfig::Random(c) => c.termination.as_ref(),
        }
    }

    /// Checks this strategy's value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            StrategyConfig::Genetic(c) => c.validate(),
            StrategyConfig::SimulatedAnnealing(c) => c.validate(),
            StrategyConfig::Ring(c) if c.window == 0 => {
                Err(ConfigError::Invalid("ring window must be positive".into()))
            }
            StrategyConfig::Ring(c) if c.batch_size == 0 => {
                Err(ConfigError::Invalid("ring batch_size must be positive".into()))
            }
            StrategyConfig::Random(c) if c.batch_size == 0 => {
                Err(ConfigError::Invalid("random batch_size must be positive".into()))
            }
            _ => Ok(()),
        }
    }
}

fn check_fraction(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

/// Greedy construction configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GreedyConfig {
    /// Strategy termination override.
    pub termination: Option<TerminationConfig>,
}

/// Genetic search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneticConfig {
    /// Individuals per generation.
    pub population_size: usize,

    /// Maximum generations per population.
    pub generations: u64,

    /// Individuals sampled per tournament.
    pub tournament_size: usize,

    /// Probability that a child is mutated.
    pub mutation_rate: f64,

    /// Fraction of the best individuals copied unchanged.
    pub elite_fraction: f64,

    /// Fraction of each generation replaced by fresh random individuals.
    pub immigrant_fraction: f64,

    /// Fraction of the initial population seeded from chokepoint cells.
    pub chokepoint_seed_fraction: f64,

    /// Independent populations evolved concurrently.
    pub runs: usize,

    /// Strategy termination override.
    pub termination: Option<TerminationConfig>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            generations: 500,
            tournament_size: 5,
            mutation_rate: 0.3,
            elite_fraction: 0.05,
            immigrant_fraction: 0.15,
            chokepoint_seed_fraction: 0.0,
            runs: 1,
            termination: None,
        }
    }
}

impl GeneticConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::Invalid(
                "population_size must be at least 2".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::Invalid("tournament_size must be positive".into()));
        }
        if self.runs == 0 {
            return Err(ConfigError::Invalid("runs must be positive".into()));
        }
        check_fraction("mutation_rate", self.mutation_rate)?;
        check_fraction("elite_fraction", self.elite_fraction)?;
        check_fraction("immigrant_fraction", self.immigrant_fraction)?;
        check_fraction("chokepoint_seed_fraction", self.chokepoint_seed_fraction)?;
        if self.elite_fraction + self.immigrant_fraction > 1.0 {
            return Err(ConfigError::Invalid(
                "elite_fraction + immigrant_fraction must not exceed 1".into(),
            ));
        }
        Ok(())
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AnnealingConfig {
    /// Iterations per restart.
    pub iterations: u64,

    /// Independent restarts.
    pub restarts: usize,

    /// Temperature at the start of every restart.
    pub starting_temperature: f64,

    /// Multiplicative temperature decay per iteration.
    pub cooling_rate: f64,

    /// Below this temperature only improving moves are accepted.
    pub min_temperature: f64,

    /// Strategy termination override.
    pub termination: Option<TerminationConfig>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            restarts: 4,
            starting_temperature: 10.0,
            cooling_rate: 0.9999,
            min_temperature: 0.01,
            termination: None,
        }
    }
}

impl AnnealingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "cooling_rate must be within (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if self.starting_temperature < 0.0 || self.min_temperature < 0.0 {
            return Err(ConfigError::Invalid(
                "temperatures must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Exhaustive search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExhaustiveConfig {
    /// Maximum number of nodes to expand (None = unlimited).
    pub node_limit: Option<u64>,

    /// Strategy termination override.
    pub termination: Option<TerminationConfig>,
}

/// Ring search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RingConfig {
    /// Ring members considered per radius, nearest first.
    pub window: usize,

    /// Combinations evaluated per parallel batch.
    pub batch_size: usize,

    /// Strategy termination override.
    pub termination: Option<TerminationConfig>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            window: 20,
            batch_size: 1024,
            termination: None,
        }
    }
}

/// Random sampling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RandomConfig {
    /// Total samples to draw.
    pub samples: u64,

    /// Samples evaluated per parallel batch.
    pub batch_size: usize,

    /// Strategy termination override.
    pub termination: Option<TerminationConfig>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            batch_size: 256,
            termination: None,
        }
    }
}
