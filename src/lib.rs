//! Fixed-size subset selection by genetic algorithm.
//!
//! Given a catalog of items with non-negative costs, picks `target_count`
//! distinct items whose total cost is low, for example the problems of a
//! contest set with the smallest total expected solving time.
//!
//! - [`catalog`]: The read-only input: [`CandidateItem`](catalog::CandidateItem),
//!   [`Catalog`](catalog::Catalog), and the [`CatalogProvider`](catalog::CatalogProvider) seam
//! - [`ga`]: Encoding, fitness, roulette selection, order crossover, swap
//!   mutation, and the generational loop
//! - [`random`]: Per-run seeded generators
//! - [`error`]: Configuration and run errors
//!
//! The search is a stochastic heuristic; it does not guarantee the optimal
//! subset. Each run owns its own generator, so runs are reentrant, and runs
//! with the same seed are bit-for-bit reproducible.
//!
//! # Example
//!
//! ```
//! use subset_evolve::catalog::{CandidateItem, Catalog};
//! use subset_evolve::ga::{OptimizerConfig, SubsetOptimizer};
//!
//! let catalog = Catalog::new(vec![
//!     CandidateItem::new("a", "A", 10, 1),
//!     CandidateItem::new("b", "B", 20, 1),
//!     CandidateItem::new("c", "C", 5, 1),
//!     CandidateItem::new("d", "D", 15, 1),
//! ]);
//! let config = OptimizerConfig::new(2)
//!     .with_population_size(10)
//!     .with_max_generations(5)
//!     .with_seed(42);
//!
//! let result = SubsetOptimizer::run(&catalog, &config)?;
//! assert_eq!(result.items.len(), 2);
//! # Ok::<(), subset_evolve::error::OptimizeError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod random;
