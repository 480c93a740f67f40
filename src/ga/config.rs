//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::crossover::Crossover;
use super::mutation::DEFAULT_SWAPS;
use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the TSP genetic algorithm.
///
/// Setters accept any value; [`validate`](Self::validate) reports values
/// that make no sense, but the runner does not require it.
///
/// # Defaults
///
/// ```
/// use u_tspga::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.generations, 10);
/// assert_eq!(config.elite_count, 10);
/// assert_eq!(config.selection, Selection::Tournament(3));
/// assert_eq!(config.crossover, Crossover::Pmx);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tspga::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_generations(200)
///     .with_elite_count(5)
///     .with_selection(Selection::Ranked)
///     .with_crossover(Crossover::EdgeRecombination)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of generations per run.
    pub generations: usize,

    /// Number of best tours copied unchanged into each next generation.
    ///
    /// Values above the population size behave as "everyone".
    pub elite_count: usize,

    /// Probability of replacing a parent pair with its children.
    pub crossover_rate: f64,

    /// Probability, per offspring, of applying mutation.
    pub mutation_rate: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Random swaps performed by one mutation.
    pub mutation_swaps: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 10,
            elite_count: 10,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation_swaps: DEFAULT_SWAPS,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection with sample size `k`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, op: Crossover) -> Self {
        self.crossover = op;
        self
    }

    /// Sets the number of swaps per mutation.
    pub fn with_mutation_swaps(mut self, swaps: usize) -> Self {
        self.mutation_swaps = swaps;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks rates and the tournament size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::EmptyTournament);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.generations, 10);
        assert_eq!(config.elite_count, 10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.crossover, Crossover::Pmx);
        assert_eq!(config.mutation_swaps, 3);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_generations(100)
            .with_elite_count(2)
            .with_crossover_rate(0.9)
            .with_mutation_rate(0.2)
            .with_selection(Selection::Roulette)
            .with_crossover(Crossover::Cycle)
            .with_mutation_swaps(1)
            .with_seed(42);

        assert_eq!(config.generations, 100);
        assert_eq!(config.elite_count, 2);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.crossover, Crossover::Cycle);
        assert_eq!(config.mutation_swaps, 1);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_setters_accept_anything() {
        let config = GaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.5);
        assert!((config.crossover_rate - 1.5).abs() < 1e-10);
        assert!((config.mutation_rate + 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rates() {
        let err = GaConfig::default()
            .with_crossover_rate(1.5)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::RateOutOfRange {
                name: "crossover_rate",
                value: 1.5
            }
        );

        let err = GaConfig::default()
            .with_mutation_rate(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RateOutOfRange {
                name: "mutation_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_empty_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyTournament));
    }

    #[test]
    fn test_with_tournament_size() {
        let config = GaConfig::default().with_tournament_size(5);
        assert_eq!(config.selection, Selection::Tournament(5));
    }
}
