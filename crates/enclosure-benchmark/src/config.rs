//! Benchmark configuration.

/// Configuration for a benchmark run.
///
/// Controls warmup iterations, measurement runs and seeding.
///
/// # Example
///
/// ```
/// use enclosure_benchmark::BenchmarkConfig;
///
/// let config = BenchmarkConfig::new("Lake")
///     .with_warmup_count(3)
///     .with_run_count(10);
///
/// assert_eq!(config.name(), "Lake");
/// assert_eq!(config.warmup_count(), 3);
/// assert_eq!(config.run_count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    name: String,
    warmup_count: usize,
    run_count: usize,
    random_seed: Option<u64>,
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration with the given name.
    ///
    /// Defaults:
    /// - warmup_count: 1
    /// - run_count: 3
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            warmup_count: 1,
            run_count: 3,
            random_seed: None,
        }
    }

    /// Sets the number of warmup runs (not measured).
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Sets the number of measurement runs.
    pub fn with_run_count(mut self, count: usize) -> Self {
        self.run_count = count;
        self
    }

    /// Seeds measurement run `i` with `seed + i`, making results repeatable.
    ///
    /// Without a seed each solver uses its own seed setting.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn warmup_count(&self) -> usize {
        self.warmup_count
    }

    pub fn run_count(&self) -> usize {
        self.run_count
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new("Benchmark")
    }
}
