//! Evolutionary loop execution.
//!
//! [`Evolution`] holds the state of one run and advances it one generation
//! at a time: evaluate → select → reproduce. [`SubsetOptimizer`] drives an
//! `Evolution` to completion and is what most callers want.

use super::config::OptimizerConfig;
use super::fitness::{best_index, FitnessEvaluator};
use super::operators::{maybe_mutate, order_crossover, random_individual};
use super::selection::roulette_select;
use super::types::{Individual, Population};
use crate::catalog::{CandidateItem, Catalog, CatalogProvider};
use crate::error::Result;
use crate::random::rng_from_option;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Selected items, in the order of the winning individual.
    pub items: Vec<CandidateItem>,

    /// Catalog indices of `items`.
    pub indices: Vec<usize>,

    /// Fitness of the winning individual.
    pub fitness: f64,

    /// Total cost of `items`.
    pub total_cost: u64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness of every evaluated population, initial one first.
    pub fitness_history: Vec<f64>,
}

impl OptimizationResult {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            indices: Vec::new(),
            fitness: 1.0,
            total_cost: 0,
            generations: 0,
            cancelled: false,
            fitness_history: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// State of one optimization run.
///
/// Use this directly to interleave generations with other work, to stop on
/// a wall-clock budget, or to inspect the population between generations.
///
/// ```
/// use subset_evolve::catalog::{CandidateItem, Catalog};
/// use subset_evolve::ga::{Evolution, OptimizerConfig};
///
/// let catalog: Catalog = (0..8)
///     .map(|i| CandidateItem::new(format!("p{i}"), format!("Problem {i}"), i * 5, 1))
///     .collect();
/// let config = OptimizerConfig::new(3).with_max_generations(20).with_seed(1);
///
/// let mut evolution = Evolution::new(&catalog, &config).unwrap();
/// while evolution.step().unwrap() {}
/// let result = evolution.finish().unwrap();
/// assert_eq!(result.items.len(), 3);
/// assert_eq!(result.generations, 20);
/// ```
pub struct Evolution<'a, R: Rng = StdRng> {
    catalog: &'a Catalog,
    config: OptimizerConfig,
    evaluator: FitnessEvaluator<'a>,
    rng: R,
    population: Population,
    generation: usize,
    fitness_history: Vec<f64>,
}

impl<'a> Evolution<'a, StdRng> {
    /// Starts a run with a generator seeded from `config.seed`.
    pub fn new(catalog: &'a Catalog, config: &OptimizerConfig) -> Result<Self> {
        Self::with_rng(catalog, config, rng_from_option(config.seed))
    }
}

impl<'a, R: Rng> Evolution<'a, R> {
    /// Starts a run that draws from `rng`. `config.seed` is ignored.
    ///
    /// Builds the initial population. An empty catalog or a zero target
    /// yields a run that is already finished and has no population.
    pub fn with_rng(catalog: &'a Catalog, config: &OptimizerConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let target = config.target_count.min(catalog.len());
        if target < config.target_count {
            debug!(
                "target_count {} exceeds catalog size {}, clamping",
                config.target_count,
                catalog.len()
            );
        }

        let population = if target == 0 {
            Vec::new()
        } else {
            (0..config.population_size)
                .map(|_| random_individual(catalog.len(), target, &mut rng))
                .collect()
        };

        debug!(
            "starting subset search: {} of {} items, population {}, {} generations",
            target,
            catalog.len(),
            population.len(),
            config.max_generations
        );

        Ok(Self {
            catalog,
            config: config.clone(),
            evaluator: FitnessEvaluator::new(catalog, config.index_policy),
            rng,
            population,
            generation: 0,
            fitness_history: Vec::new(),
        })
    }

    /// Number of generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Returns `true` once no more generations will run.
    pub fn is_finished(&self) -> bool {
        self.population.is_empty() || self.generation >= self.config.max_generations
    }

    /// Fittest individual of the current population and its fitness.
    pub fn best(&self) -> Result<Option<(&Individual, f64)>> {
        let fitness = self.evaluate()?;
        Ok(best_index(&fitness).map(|i| (&self.population[i], fitness[i])))
    }

    /// Runs one generation.
    ///
    /// Returns `Ok(true)` if further generations remain. Calling this on a
    /// finished run does nothing and returns `Ok(false)`.
    pub fn step(&mut self) -> Result<bool> {
        if self.is_finished() {
            return Ok(false);
        }

        let fitness = self.evaluate()?;
        self.record(&fitness);

        let elites = self.elites(&fitness);
        let selected = roulette_select(
            &self.population,
            &fitness,
            self.config.population_size,
            &mut self.rng,
        );
        let offspring = self.reproduce(&selected);

        let mut next = elites;
        let room = self.config.population_size - next.len();
        next.extend(offspring.into_iter().take(room));
        self.population = next;
        self.generation += 1;

        Ok(!self.is_finished())
    }

    /// Evaluates the final population and decodes its fittest individual.
    pub fn finish(mut self) -> Result<OptimizationResult> {
        if self.population.is_empty() {
            debug!("nothing to select, returning empty result");
            return Ok(OptimizationResult::empty());
        }

        let fitness = self.evaluate()?;
        self.record(&fitness);

        let Some(best) = best_index(&fitness) else {
            return Ok(OptimizationResult::empty());
        };
        let winner = self.population.swap_remove(best);
        let total_cost = self.evaluator.total_cost(&winner)?;
        let indices = winner.into_genes();

        debug!(
            "finished after {} generations: total cost {}, fitness {:.6}",
            self.generation, total_cost, fitness[best]
        );

        Ok(OptimizationResult {
            items: self.catalog.decode(&indices),
            indices,
            fitness: fitness[best],
            total_cost,
            generations: self.generation,
            cancelled: false,
            fitness_history: self.fitness_history,
        })
    }

    fn evaluate(&self) -> Result<Vec<f64>> {
        self.evaluator.evaluate(&self.population, self.config.parallel)
    }

    fn record(&mut self, fitness: &[f64]) {
        if let Some(i) = best_index(fitness) {
            trace!("generation {}: best fitness {:.6}", self.generation, fitness[i]);
            self.fitness_history.push(fitness[i]);
        }
    }

    /// Clones of the `k` fittest individuals, fittest first, stable on ties.
    fn elites(&self, fitness: &[f64]) -> Population {
        let k = self.config.elitism.count().min(self.population.len());
        if k == 0 {
            return Vec::with_capacity(self.config.population_size);
        }
        let mut order: Vec<usize> = (0..self.population.len()).collect();
        order.sort_by(|&a, &b| {
            fitness[b]
                .partial_cmp(&fitness[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut elites = Vec::with_capacity(self.config.population_size);
        elites.extend(order[..k].iter().map(|&i| self.population[i].clone()));
        elites
    }

    /// Pairs up `selected` in order; each pair yields two crossover children,
    /// a trailing unpaired individual is only mutated.
    fn reproduce(&mut self, selected: &[Individual]) -> Population {
        let n = self.catalog.len();
        let p = self.config.mutation_probability;
        let mut next = Vec::with_capacity(selected.len());

        for pair in selected.chunks(2) {
            match pair {
                [a, b] => {
                    let c1 = order_crossover(a, b, n, &mut self.rng);
                    next.push(maybe_mutate(c1, p, &mut self.rng));
                    let c2 = order_crossover(b, a, n, &mut self.rng);
                    next.push(maybe_mutate(c2, p, &mut self.rng));
                }
                [a] => next.push(maybe_mutate(a.clone(), p, &mut self.rng)),
                _ => unreachable!("chunks(2) yields one or two items"),
            }
        }

        next
    }
}

/// Runs subset optimizations to completion.
///
/// # Usage
///
/// ```
/// use subset_evolve::catalog::{CandidateItem, Catalog};
/// use subset_evolve::ga::{OptimizerConfig, SubsetOptimizer};
///
/// let catalog = Catalog::new(vec![
///     CandidateItem::new("a", "A", 10, 1),
///     CandidateItem::new("b", "B", 20, 1),
///     CandidateItem::new("c", "C", 5, 2),
///     CandidateItem::new("d", "D", 15, 2),
/// ]);
/// let config = OptimizerConfig::new(2).with_seed(42);
/// let result = SubsetOptimizer::run(&catalog, &config).unwrap();
/// assert_eq!(result.items.len(), 2);
/// ```
pub struct SubsetOptimizer;

impl SubsetOptimizer {
    /// Runs the optimization.
    pub fn run(catalog: &Catalog, config: &OptimizerConfig) -> Result<OptimizationResult> {
        Self::run_with_cancel(catalog, config, None)
    }

    /// Runs the optimization with a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        catalog: &Catalog,
        config: &OptimizerConfig,
        rng: R,
    ) -> Result<OptimizationResult> {
        let mut evolution = Evolution::with_rng(catalog, config, rng)?;
        while evolution.step()? {}
        evolution.finish()
    }

    /// Loads the catalog from `provider`, then runs the optimization.
    pub fn run_with_provider<P: CatalogProvider + ?Sized>(
        provider: &P,
        config: &OptimizerConfig,
    ) -> Result<OptimizationResult> {
        let catalog = provider.load_catalog()?;
        Self::run(&catalog, config)
    }

    /// Runs the optimization with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best individual of the
    /// current population.
    pub fn run_with_cancel(
        catalog: &Catalog,
        config: &OptimizerConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizationResult> {
        let mut evolution = Evolution::new(catalog, config)?;
        let mut cancelled = false;

        while !evolution.is_finished() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!("cancelled at generation {}", evolution.generation());
                    cancelled = true;
                    break;
                }
            }
            evolution.step()?;
        }

        let mut result = evolution.finish()?;
        result.cancelled = cancelled;
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, OptimizeError};
    use crate::ga::{Elitism, IndexPolicy};
    use crate::random::create_rng;

    fn four_items() -> Catalog {
        Catalog::new(vec![
            CandidateItem::new("A", "A", 10, 1),
            CandidateItem::new("B", "B", 20, 1),
            CandidateItem::new("C", "C", 5, 1),
            CandidateItem::new("D", "D", 15, 1),
        ])
    }

    fn ladder(n: u32) -> Catalog {
        (0..n)
            .map(|i| CandidateItem::new(format!("id{i}"), format!("item {i}"), (i * 7) % 50 + 1, 1))
            .collect()
    }

    #[test]
    fn test_four_item_scenario() {
        let config = OptimizerConfig::new(2)
            .with_population_size(10)
            .with_max_generations(5)
            .with_seed(42);

        let result = SubsetOptimizer::run(&four_items(), &config).unwrap();

        assert_eq!(result.items.len(), 2);
        assert_ne!(result.items[0].id, result.items[1].id);
        assert!(result.total_cost <= 35, "worse than {{B, D}}: {}", result.total_cost);
        assert_eq!(result.generations, 5);
        assert_eq!(result.fitness_history.len(), 6);
    }

    #[test]
    fn test_finds_cheapest_pair() {
        let config = OptimizerConfig::new(2)
            .with_population_size(30)
            .with_max_generations(30)
            .with_elitism(Elitism::Best(1))
            .with_seed(3);

        let result = SubsetOptimizer::run(&four_items(), &config).unwrap();

        // {A, C}
        assert_eq!(result.total_cost, 15);
    }

    #[test]
    fn test_zero_generations_returns_best_initial() {
        let catalog = ladder(20);
        let config = OptimizerConfig::new(5)
            .with_max_generations(0)
            .with_seed(11);

        let evolution = Evolution::new(&catalog, &config).unwrap();
        let (best, best_fitness) = evolution.best().unwrap().unwrap();
        let expected = best.genes().to_vec();

        let result = SubsetOptimizer::run(&catalog, &config).unwrap();
        assert_eq!(result.indices, expected);
        assert_eq!(result.fitness, best_fitness);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let config = OptimizerConfig::new(3).with_seed(1);
        let result = SubsetOptimizer::run(&Catalog::default(), &config).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.generations, 0);
        assert!(result.fitness_history.is_empty());
    }

    #[test]
    fn test_zero_target() {
        let config = OptimizerConfig::new(0).with_seed(1);
        let result = SubsetOptimizer::run(&four_items(), &config).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_target_clamped_to_catalog() {
        let config = OptimizerConfig::new(10)
            .with_population_size(6)
            .with_max_generations(4)
            .with_seed(5);

        let result = SubsetOptimizer::run(&four_items(), &config).unwrap();

        let mut ids: Vec<&str> = result.items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        assert_eq!(result.total_cost, 50);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let catalog = ladder(40);
        let config = OptimizerConfig::new(8)
            .with_population_size(20)
            .with_max_generations(25)
            .with_seed(1234);

        let a = SubsetOptimizer::run(&catalog, &config).unwrap();
        let b = SubsetOptimizer::run(&catalog, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_with_rng_matches_seeded_run() {
        let catalog = ladder(15);
        let config = OptimizerConfig::new(4).with_max_generations(10).with_seed(77);

        let seeded = SubsetOptimizer::run(&catalog, &config).unwrap();
        let given = SubsetOptimizer::run_with_rng(&catalog, &config, create_rng(77)).unwrap();
        assert_eq!(seeded, given);
    }

    #[test]
    fn test_population_size_constant() {
        let catalog = ladder(12);
        for population_size in [1, 2, 7, 10] {
            let config = OptimizerConfig::new(4)
                .with_population_size(population_size)
                .with_max_generations(5)
                .with_seed(9);
            let mut evolution = Evolution::new(&catalog, &config).unwrap();
            assert_eq!(evolution.population().len(), population_size);
            while evolution.step().unwrap() {
                assert_eq!(evolution.population().len(), population_size);
            }
            assert_eq!(evolution.population().len(), population_size);
            assert!(evolution.population().iter().all(|ind| ind.is_valid(12) && ind.len() == 4));
        }
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let config = OptimizerConfig::new(2).with_max_generations(1).with_seed(2);
        let catalog = four_items();
        let mut evolution = Evolution::new(&catalog, &config).unwrap();
        assert!(!evolution.step().unwrap());
        assert!(evolution.is_finished());
        assert!(!evolution.step().unwrap());
        assert_eq!(evolution.generation(), 1);
    }

    #[test]
    fn test_elitism_never_loses_best() {
        let catalog = ladder(60);
        let config = OptimizerConfig::new(10)
            .with_population_size(20)
            .with_max_generations(40)
            .with_mutation_probability(0.5)
            .with_elitism(Elitism::Best(1))
            .with_seed(42);

        let result = SubsetOptimizer::run(&catalog, &config).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness should never drop with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OptimizerConfig::new(2).with_population_size(0);
        assert_eq!(
            SubsetOptimizer::run(&four_items(), &config),
            Err(OptimizeError::Config(ConfigError::PopulationTooSmall))
        );
    }

    #[test]
    fn test_strict_policy_accepts_generated_individuals() {
        let config = OptimizerConfig::new(3)
            .with_max_generations(10)
            .with_index_policy(IndexPolicy::Strict)
            .with_seed(8);
        assert!(SubsetOptimizer::run(&ladder(9), &config).is_ok());
    }

    #[test]
    fn test_provider_run() {
        let items = four_items().items().to_vec();
        let config = OptimizerConfig::new(2).with_seed(42);
        let from_provider = SubsetOptimizer::run_with_provider(&items, &config).unwrap();
        let direct = SubsetOptimizer::run(&four_items(), &config).unwrap();
        assert_eq!(from_provider, direct);
    }

    #[test]
    fn test_cancellation_before_start() {
        let config = OptimizerConfig::new(3)
            .with_max_generations(10_000)
            .with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));

        let result =
            SubsetOptimizer::run_with_cancel(&ladder(30), &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.items.len(), 3);
    }

    #[test]
    fn test_cancellation_from_other_thread() {
        let config = OptimizerConfig::new(20)
            .with_population_size(100)
            .with_max_generations(usize::MAX)
            .with_seed(42);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result =
            SubsetOptimizer::run_with_cancel(&ladder(200), &config, Some(cancel)).unwrap();

        assert!(result.cancelled, "expected cancelled result");
        assert_eq!(result.items.len(), 20);
    }
}
