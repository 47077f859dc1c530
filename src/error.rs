//! Error types.
//!
//! The optimizer itself has very few failure modes: everything it touches is
//! already in memory. What remains is configuration validation, the optional
//! strict index check, and failures reported by a [`CatalogProvider`].
//!
//! [`CatalogProvider`]: crate::catalog::CatalogProvider

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    PopulationTooSmall,
    #[error("mutation_probability must be within [0, 1], got {0}")]
    InvalidMutationProbability(f64),
    #[error("elitism keeps {elites} individuals but the population only holds {population}")]
    EliteCountTooLarge { elites: usize, population: usize },
}

/// Errors returned by an optimization run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("index {index} is outside a catalog of {catalog_size} items")]
    IndexOutOfRange { index: usize, catalog_size: usize },
    #[error("catalog provider failed: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
