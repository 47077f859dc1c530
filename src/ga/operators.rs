//! Subset-encoding genetic operators.
//!
//! Individuals are ordered lists of distinct catalog indices that cover only
//! part of the catalog, so these operators differ from their classic
//! full-permutation counterparts: crossover may pull in indices that neither
//! parent shares, and every operator keeps the no-duplicates invariant.
//!
//! # Operators
//!
//! - [`random_individual`]: truncated uniform shuffle
//! - [`order_crossover`] (OX): Davis (1985), one child per call
//! - [`swap_mutation`]: exchange two random positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::types::Individual;
use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// Initialization
// ============================================================================

/// Creates a random individual of `target_count` distinct indices drawn from
/// `0..catalog_size`.
///
/// Shuffles the full index range and keeps the prefix, so distinctness
/// needs no extra bookkeeping.
///
/// # Panics
/// Panics if `target_count > catalog_size`.
pub fn random_individual<R: Rng>(catalog_size: usize, target_count: usize, rng: &mut R) -> Individual {
    assert!(
        target_count <= catalog_size,
        "target_count must not exceed catalog_size"
    );
    let mut indices: Vec<usize> = (0..catalog_size).collect();
    indices.shuffle(rng);
    indices.truncate(target_count);
    Individual::new(indices)
}

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) producing a single child.
///
/// # Algorithm
///
/// 1. Pick `start` uniformly in `[0, L)`, then `end` uniformly in `[start, L)`
/// 2. The child starts with `parent1[start..=end]`
/// 3. Scan `parent2` left to right, appending indices not yet present,
///    until the child has `L` entries
/// 4. If still short, append unused catalog indices in ascending order
///
/// Step 4 cannot trigger when both parents are valid individuals of equal
/// length; it only keeps the length invariant for arbitrary input.
///
/// # Complexity
/// O(L + catalog_size) time and space
///
/// # Panics
/// Panics if parents have different lengths or contain an index
/// `>= catalog_size`.
pub fn order_crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    catalog_size: usize,
    rng: &mut R,
) -> Individual {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n == 0 {
        return Individual::default();
    }

    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    ox_build_child(parent1.genes(), parent2.genes(), start, end, catalog_size)
}

/// Build one OX child: segment from `template`, remainder from `donor`.
fn ox_build_child(
    template: &[usize],
    donor: &[usize],
    start: usize,
    end: usize,
    catalog_size: usize,
) -> Individual {
    let n = template.len();
    let mut child = Vec::with_capacity(n);
    let mut used = vec![false; catalog_size];

    for &idx in &template[start..=end] {
        child.push(idx);
        used[idx] = true;
    }

    for &idx in donor {
        if child.len() == n {
            break;
        }
        if !used[idx] {
            child.push(idx);
            used[idx] = true;
        }
    }

    for idx in 0..catalog_size {
        if child.len() == n {
            break;
        }
        if !used[idx] {
            child.push(idx);
            used[idx] = true;
        }
    }

    Individual::new(child)
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange two random positions.
///
/// The two positions are drawn independently and may coincide.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(individual: &mut Individual, rng: &mut R) {
    let n = individual.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    individual.genes_mut().swap(i, j);
}

/// Applies [`swap_mutation`] with the given probability and returns the
/// (possibly unchanged) individual.
pub fn maybe_mutate<R: Rng>(mut individual: Individual, probability: f64, rng: &mut R) -> Individual {
    if rng.random_range(0.0..1.0) < probability {
        swap_mutation(&mut individual, rng);
    }
    individual
}

// ============================================================================
// Tests
// ============================================================================
