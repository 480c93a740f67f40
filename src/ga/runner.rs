//! GA evolutionary loop execution.
//!
//! [`GaRunner`] owns one population and advances it generation by
//! generation: elitism, then selection → crossover → mutation until the next
//! population is full.

use super::config::GaConfig;
use super::crossover::CrossoverOperator;
use super::mutation::mutate;
use super::selection::ParentSelector;
use crate::random::{is_hit, rng_from_option};
use crate::tsp::{Population, Tour};
use rand::rngs::StdRng;
use rand::RngCore;
use tracing::{debug, info, warn};

/// Cities in the population built by [`GaRunner::new`].
pub const DEFAULT_NUM_CITIES: usize = 10;

/// Tours in the population built by [`GaRunner::new`].
pub const DEFAULT_POPULATION_SIZE: usize = 10;

/// Cities in the fallback population used when none is supplied.
pub const FALLBACK_NUM_CITIES: usize = 35;

/// Tours in the fallback population used when none is supplied.
pub const FALLBACK_POPULATION_SIZE: usize = 500;

/// Draws allowed for a second parent that differs from the first.
pub const MAX_RESELECT_ATTEMPTS: usize = 100;

/// Best and average distance of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// 0 for the initial population.
    pub generation: usize,
    pub best_distance: u64,
    /// Truncated mean.
    pub average_distance: u64,
}

/// Result of a GA run.
///
/// The per-generation series include the initial population, so they hold
/// `generations + 1` entries.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Shortest tour of the final population.
    pub best: Option<Tour>,

    pub best_first_generation: u64,
    pub average_first_generation: u64,
    pub best_last_generation: u64,
    pub average_last_generation: u64,

    /// Best distance per generation, initial population first.
    pub best_per_generation: Vec<u64>,

    /// Average distance per generation, initial population first.
    pub average_per_generation: Vec<u64>,

    /// Generations executed since the last reset.
    pub generations: usize,
}

/// Executes the GA evolutionary loop.
///
/// The runner keeps the population it was given as the *initial*
/// population and evolves a working copy. [`reset`](Self::reset) restores
/// that copy so the same starting tours can be evolved again.
///
/// # Usage
///
/// ```
/// use u_tspga::ga::{Crossover, GaConfig, GaRunner};
/// use u_tspga::random::create_rng;
/// use u_tspga::tsp::Population;
///
/// let mut rng = create_rng(7);
/// let population = Population::fixed(50, true, &mut rng);
/// let config = GaConfig::default()
///     .with_generations(20)
///     .with_elite_count(2)
///     .with_crossover(Crossover::Order)
///     .with_seed(42);
///
/// let mut runner = GaRunner::with_population(config, population);
/// let result = runner.run();
/// assert_eq!(result.best_per_generation.len(), 21);
/// assert!(result.best_last_generation <= result.best_first_generation);
/// ```
#[derive(Debug)]
pub struct GaRunner {
    config: GaConfig,
    initial: Population,
    population: Population,
    rng: StdRng,
    history: Vec<GenerationStats>,
}

impl GaRunner {
    /// A runner over a default population of random cities.
    pub fn new(config: GaConfig) -> Self {
        let mut rng = rng_from_option(config.seed);
        let initial = Population::random(DEFAULT_NUM_CITIES, DEFAULT_POPULATION_SIZE, true, &mut rng);
        Self::assemble(config, initial, rng)
    }

    /// A runner over `population`.
    pub fn with_population(config: GaConfig, population: Population) -> Self {
        let rng = rng_from_option(config.seed);
        Self::assemble(config, population, rng)
    }

    fn assemble(config: GaConfig, initial: Population, rng: StdRng) -> Self {
        let mut runner = Self {
            config,
            population: initial.duplicate(),
            initial,
            rng,
            history: Vec::new(),
        };
        runner.record(0);
        runner
    }

    /// Replaces the initial population and clears all statistics.
    ///
    /// `None` falls back to a shuffled population of
    /// [`FALLBACK_POPULATION_SIZE`] tours over [`FALLBACK_NUM_CITIES`]
    /// random cities.
    pub fn set_population(&mut self, population: Option<Population>) {
        let population = match population {
            Some(population) => population,
            None => {
                warn!(
                    cities = FALLBACK_NUM_CITIES,
                    size = FALLBACK_POPULATION_SIZE,
                    "no initial population supplied, using a random one"
                );
                Population::random(FALLBACK_NUM_CITIES, FALLBACK_POPULATION_SIZE, true, &mut self.rng)
            }
        };
        self.population = population.duplicate();
        self.initial = population;
        self.history.clear();
        self.record(0);
    }

    /// Restores the initial population and clears all statistics.
    pub fn reset(&mut self) {
        self.population = self.initial.duplicate();
        self.history.clear();
        self.record(0);
    }

    /// Runs the configured number of generations from the current
    /// population.
    ///
    /// Statistics accumulate across calls; call [`reset`](Self::reset)
    /// first for an independent run.
    pub fn run(&mut self) -> GaResult {
        let selector = self.config.selection.selector();
        let crossover = self.config.crossover.operator();
        info!(
            generations = self.config.generations,
            population = self.population.len(),
            selection = %self.config.selection,
            crossover = %self.config.crossover,
            "starting GA run"
        );

        for _ in 0..self.config.generations {
            self.population = self.next_generation(selector.as_ref(), crossover);
            let generation = self.generations() + 1;
            let stats = self.record(generation);
            debug!(
                generation,
                best = stats.best_distance,
                average = stats.average_distance,
                "generation complete"
            );
        }

        let result = self.result();
        info!(
            best_first = result.best_first_generation,
            best_last = result.best_last_generation,
            average_last = result.average_last_generation,
            "GA run finished"
        );
        result
    }

    /// Builds the population that follows the current one.
    fn next_generation(
        &mut self,
        selector: &dyn ParentSelector,
        crossover: &dyn CrossoverOperator,
    ) -> Population {
        let current = &self.population;
        let config = &self.config;
        let rng: &mut dyn RngCore = &mut self.rng;

        let mut next = Population::new(current.capacity());
        for elite in current.iter().take(config.elite_count) {
            next.add(elite.clone());
        }

        if current.is_empty() {
            warn!("population is empty, nothing to breed from");
            return next;
        }

        while !next.is_full() {
            let parent1 = selector.select(current, rng);
            let mut parent2 = selector.select(current, rng);
            let mut attempts = 1;
            while parent2 == parent1 && attempts < MAX_RESELECT_ATTEMPTS {
                parent2 = selector.select(current, rng);
                attempts += 1;
            }
            if parent2 == parent1 {
                debug!(attempts, "no distinct second parent found");
            }

            let (mut first, mut second) = if is_hit(rng, config.crossover_rate) {
                crossover.combine(parent1, parent2, rng)
            } else {
                (parent1.clone(), parent2.clone())
            };

            if is_hit(rng, config.mutation_rate) {
                first = mutate(&first, config.mutation_swaps, rng);
            }
            if is_hit(rng, config.mutation_rate) {
                second = mutate(&second, config.mutation_swaps, rng);
            }

            next.add(first);
            if !next.is_full() {
                next.add(second);
            }
        }

        next
    }

    fn record(&mut self, generation: usize) -> GenerationStats {
        let stats = GenerationStats {
            generation,
            best_distance: self.population.best_distance().unwrap_or(0),
            average_distance: self.population.average_distance().unwrap_or(0),
        };
        self.history.push(stats);
        stats
    }

    /// Snapshot of the statistics recorded so far.
    pub fn result(&self) -> GaResult {
        GaResult {
            best: self.population.fittest().cloned(),
            best_first_generation: self.best_first_generation(),
            average_first_generation: self.average_first_generation(),
            best_last_generation: self.best_last_generation(),
            average_last_generation: self.average_last_generation(),
            best_per_generation: self.best_per_generation(),
            average_per_generation: self.average_per_generation(),
            generations: self.generations(),
        }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Mutable access to the parameters used by the next [`run`](Self::run).
    ///
    /// Changing `seed` here does not reseed the runner.
    pub fn config_mut(&mut self) -> &mut GaConfig {
        &mut self.config
    }

    /// The population as assigned, before any evolution.
    pub fn initial_population(&self) -> &Population {
        &self.initial
    }

    /// The current working population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Statistics per generation, initial population first.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Generations executed since the last reset.
    pub fn generations(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub fn best_first_generation(&self) -> u64 {
        self.history.first().map_or(0, |s| s.best_distance)
    }

    pub fn average_first_generation(&self) -> u64 {
        self.history.first().map_or(0, |s| s.average_distance)
    }

    pub fn best_last_generation(&self) -> u64 {
        self.history.last().map_or(0, |s| s.best_distance)
    }

    pub fn average_last_generation(&self) -> u64 {
        self.history.last().map_or(0, |s| s.average_distance)
    }

    pub fn best_per_generation(&self) -> Vec<u64> {
        self.history.iter().map(|s| s.best_distance).collect()
    }

    pub fn average_per_generation(&self) -> Vec<u64> {
        self.history.iter().map(|s| s.average_distance).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
