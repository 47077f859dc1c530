//! Genetic algorithm for fixed-size subset selection.
//!
//! Picks `target_count` items out of a [`Catalog`](crate::catalog::Catalog)
//! so that their total cost is small. Each candidate subset is an
//! [`Individual`]: an ordered list of distinct catalog indices.
//!
//! # Pipeline
//!
//! 1. Initialization: truncated random shuffles of the catalog indices
//! 2. Evaluation: `fitness = 1 / (1 + total cost)`
//! 3. Selection: roulette wheel over fitness
//! 4. Reproduction: order crossover (OX) on consecutive pairs, then swap mutation
//! 5. Replacement: the offspring become the next population
//!
//! After the last generation the fittest individual of the final population
//! is decoded back into catalog items.
//!
//! # Key Types
//!
//! - [`OptimizerConfig`]: Run parameters (target, population, generations, mutation)
//! - [`SubsetOptimizer`]: Runs a search to completion
//! - [`Evolution`]: Resumable, generation-at-a-time search state
//! - [`OptimizationResult`]: Selected items plus run statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::{Elitism, IndexPolicy, OptimizerConfig};
pub use fitness::FitnessEvaluator;
pub use runner::{Evolution, OptimizationResult, SubsetOptimizer};
pub use types::{Individual, Population};
