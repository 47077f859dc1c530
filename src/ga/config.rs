//! Optimizer configuration.
//!
//! [`OptimizerConfig`] holds all parameters that control one optimization run.

use crate::error::ConfigError;

/// Elite preservation strategy.
///
/// With [`Elitism::None`] every individual, including the best one, goes
/// through selection, crossover, and mutation, so the best subset found so
/// far can be lost between generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Elitism {
    /// Pure generational replacement.
    #[default]
    None,

    /// Copy the `k` fittest individuals of each generation unchanged into
    /// the next one. Reproduced children fill the remaining slots.
    Best(usize),
}

impl Elitism {
    /// Number of individuals carried over unchanged.
    pub fn count(&self) -> usize {
        match self {
            Elitism::None => 0,
            Elitism::Best(k) => *k,
        }
    }
}

/// What fitness evaluation does with an index outside the catalog.
///
/// Individuals built by this crate never contain such an index, so this only
/// matters for individuals handed in from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexPolicy {
    /// Ignore the index; it contributes no cost.
    #[default]
    Skip,

    /// Report [`OptimizeError::IndexOutOfRange`](crate::error::OptimizeError::IndexOutOfRange).
    Strict,
}

/// Configuration for a subset optimization run.
///
/// # Defaults
///
/// ```
/// use subset_evolve::ga::OptimizerConfig;
///
/// let config = OptimizerConfig::new(5);
/// assert_eq!(config.target_count, 5);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use subset_evolve::ga::{Elitism, OptimizerConfig};
///
/// let config = OptimizerConfig::new(8)
///     .with_population_size(80)
///     .with_mutation_probability(0.2)
///     .with_elitism(Elitism::Best(2))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Number of items to select.
    ///
    /// Clamped to the catalog size at run time. Zero yields an empty result.
    pub target_count: usize,

    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run. Zero returns the best initial individual.
    pub max_generations: usize,

    /// Probability of applying swap mutation to an offspring (0.0–1.0).
    pub mutation_probability: f64,

    /// Elite preservation strategy.
    pub elitism: Elitism,

    /// Handling of out-of-range indices during fitness evaluation.
    pub index_policy: IndexPolicy,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate fitness in parallel.
    ///
    /// Only has an effect when the `parallel` feature is enabled. Evaluation
    /// draws no random numbers, so this never changes the result.
    pub parallel: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            target_count: 0,
            population_size: 50,
            max_generations: 100,
            mutation_probability: 0.1,
            elitism: Elitism::None,
            index_policy: IndexPolicy::Skip,
            seed: None,
            parallel: false,
        }
    }
}

impl OptimizerConfig {
    /// Default configuration selecting `target_count` items.
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            ..Self::default()
        }
    }

    /// Sets the number of items to select.
    pub fn with_target_count(mut self, n: usize) -> Self {
        self.target_count = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism strategy.
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the out-of-range index policy.
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::InvalidMutationProbability(
                self.mutation_probability,
            ));
        }
        let elites = self.elitism.count();
        if elites > 0 && elites >= self.population_size {
            return Err(ConfigError::EliteCountTooLarge {
                elites,
                population: self.population_size,
            });
        }
        Ok(())
    }
}
