//! Fitness-proportionate (roulette wheel) selection.
//!
//! Each individual owns a slice of the wheel as wide as its fitness. Since
//! fitness is strictly positive the wheel never has zero circumference.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::{Individual, Population};
use rand::Rng;

/// Draws `count` parents from `population`, with replacement.
///
/// `fitness[i]` is the score of `population[i]`. The returned population is
/// ordered by draw, not by the input order.
///
/// # Panics
/// Panics if `population` is empty or `fitness` has a different length.
pub fn roulette_select<R: Rng>(
    population: &[Individual],
    fitness: &[f64],
    count: usize,
    rng: &mut R,
) -> Population {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    assert_eq!(
        population.len(),
        fitness.len(),
        "fitness must be parallel to population"
    );

    let total: f64 = fitness.iter().sum();
    (0..count)
        .map(|_| population[spin(fitness, total, rng)].clone())
        .collect()
}

/// One spin of the wheel: the first index whose cumulative fitness reaches
/// a uniform draw from `[0, total)`.
fn spin<R: Rng>(fitness: &[f64], total: f64, rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &f) in fitness.iter().enumerate() {
        cumulative += f;
        if cumulative >= threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}
