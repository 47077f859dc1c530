//! Fitness evaluation.
//!
//! `fitness = 1 / (1 + total cost)`. The value lies in `(0, 1]`, is strictly
//! decreasing in total cost, and higher is better. Because it is never zero,
//! roulette selection always has a positive wheel to spin.

use super::config::IndexPolicy;
use super::types::Individual;
use crate::catalog::Catalog;
use crate::error::{OptimizeError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores individuals against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
    policy: IndexPolicy,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(catalog: &'a Catalog, policy: IndexPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Sum of the costs of every item in `individual`.
    pub fn total_cost(&self, individual: &Individual) -> Result<u64> {
        let mut total = 0u64;
        for &idx in individual.genes() {
            match self.catalog.cost(idx) {
                Some(cost) => total += u64::from(cost),
                None => match self.policy {
                    IndexPolicy::Skip => {}
                    IndexPolicy::Strict => {
                        return Err(OptimizeError::IndexOutOfRange {
                            index: idx,
                            catalog_size: self.catalog.len(),
                        })
                    }
                },
            }
        }
        Ok(total)
    }

    /// Fitness of one individual.
    pub fn fitness(&self, individual: &Individual) -> Result<f64> {
        let total = self.total_cost(individual)?;
        Ok(fitness_from_cost(total))
    }

    /// Fitness of every individual, in population order.
    pub fn evaluate(&self, population: &[Individual], parallel: bool) -> Result<Vec<f64>> {
        if parallel {
            return self.evaluate_parallel(population);
        }
        population.iter().map(|ind| self.fitness(ind)).collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_parallel(&self, population: &[Individual]) -> Result<Vec<f64>> {
        population.par_iter().map(|ind| self.fitness(ind)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_parallel(&self, population: &[Individual]) -> Result<Vec<f64>> {
        population.iter().map(|ind| self.fitness(ind)).collect()
    }
}

/// Maps a total cost to its fitness.
pub fn fitness_from_cost(total_cost: u64) -> f64 {
    1.0 / (1.0 + total_cost as f64)
}

/// Index of the fittest entry, first one on ties. `None` when empty.
pub(crate) fn best_index(fitness: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &f) in fitness.iter().enumerate() {
        match best {
            Some(b) if f <= fitness[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
