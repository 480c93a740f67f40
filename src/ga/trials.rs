//! Independent trials in parallel.
//!
//! Each trial is its own [`GaRunner`] over its own copy of the initial
//! population, so trials share nothing but the read-only city set.

use super::config::GaConfig;
use super::runner::{GaResult, GaRunner};
use crate::tsp::Population;
use rayon::prelude::*;

/// Outcome of [`run_trials`].
#[derive(Debug, Clone)]
pub struct TrialSummary {
    /// One result per trial, in trial order.
    pub results: Vec<GaResult>,

    /// Mean of the last-generation best distances.
    pub mean_best: f64,

    /// Mean of the last-generation average distances.
    pub mean_average: f64,

    /// Mean best distance per generation across trials, initial population
    /// first.
    pub mean_best_per_generation: Vec<f64>,

    /// Mean average distance per generation across trials.
    pub mean_average_per_generation: Vec<f64>,
}

/// Runs `trials` independent GA runs from the same initial population.
///
/// Trial `i` is seeded with `seed + i` when `config.seed` is set, so the
/// whole batch is reproducible.
///
/// ```
/// use u_tspga::ga::{run_trials, GaConfig};
/// use u_tspga::random::create_rng;
/// use u_tspga::tsp::Population;
///
/// let population = Population::fixed(20, true, &mut create_rng(1));
/// let config = GaConfig::default().with_generations(5).with_elite_count(1).with_seed(42);
/// let summary = run_trials(&config, &population, 4);
/// assert_eq!(summary.results.len(), 4);
/// ```
pub fn run_trials(config: &GaConfig, initial: &Population, trials: usize) -> TrialSummary {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(trials, base_seed, "starting parallel trials");

    let results: Vec<GaResult> = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let config = config
                .clone()
                .with_seed(base_seed.wrapping_add(trial as u64));
            GaRunner::with_population(config, initial.duplicate()).run()
        })
        .collect();

    TrialSummary {
        mean_best: mean(results.iter().map(|r| r.best_last_generation)),
        mean_average: mean(results.iter().map(|r| r.average_last_generation)),
        mean_best_per_generation: mean_series(&results, |r| &r.best_per_generation),
        mean_average_per_generation: mean_series(&results, |r| &r.average_per_generation),
        results,
    }
}

/// Element-wise mean of one series over all trials.
fn mean_series(results: &[GaResult], series: impl Fn(&GaResult) -> &[u64]) -> Vec<f64> {
    let len = results.iter().map(|r| series(r).len()).min().unwrap_or(0);
    (0..len)
        .map(|g| mean(results.iter().map(|r| series(r)[g])))
        .collect()
}

fn mean(values: impl ExactSizeIterator<Item = u64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.map(|v| v as f64).sum::<f64>() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn population() -> Population {
        Population::fixed(20, true, &mut create_rng(42))
    }

    #[test]
    fn test_trials_share_initial_population() {
        let config = GaConfig::default().with_generations(5).with_seed(1);
        let summary = run_trials(&config, &population(), 6);
        assert_eq!(summary.results.len(), 6);
        let first = summary.results[0].best_first_generation;
        assert!(summary.results.iter().all(|r| r.best_first_generation == first));
    }

    #[test]
    fn test_trials_are_reproducible() {
        let config = GaConfig::default().with_generations(10).with_seed(7);
        let a = run_trials(&config, &population(), 4);
        let b = run_trials(&config, &population(), 4);
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.best_per_generation, y.best_per_generation);
        }
        assert!((a.mean_best - b.mean_best).abs() < 1e-12);
    }

    #[test]
    fn test_mean() {
        let config = GaConfig::default().with_generations(3).with_seed(3);
        let summary = run_trials(&config, &population(), 3);
        let expected = summary
            .results
            .iter()
            .map(|r| r.best_last_generation as f64)
            .sum::<f64>()
            / 3.0;
        assert!((summary.mean_best - expected).abs() < 1e-9);
    }

    #[test]
    fn test_mean_series() {
        let config = GaConfig::default()
            .with_generations(8)
            .with_elite_count(1)
            .with_seed(11);
        let summary = run_trials(&config, &population(), 5);

        assert_eq!(summary.mean_best_per_generation.len(), 9);
        assert_eq!(summary.mean_average_per_generation.len(), 9);
        // Every trial starts from the same population.
        let first = summary.results[0].best_first_generation as f64;
        assert!((summary.mean_best_per_generation[0] - first).abs() < 1e-9);
        let last = summary.mean_best_per_generation[8];
        assert!((last - summary.mean_best).abs() < 1e-9);
        // One elite keeps each trial's best from getting worse.
        assert!(summary
            .mean_best_per_generation
            .windows(2)
            .all(|w| w[1] <= w[0] + 1e-9));
    }

    #[test]
    fn test_no_trials() {
        let summary = run_trials(&GaConfig::default(), &population(), 0);
        assert!(summary.results.is_empty());
        assert_eq!(summary.mean_best, 0.0);
        assert_eq!(summary.mean_average, 0.0);
        assert!(summary.mean_best_per_generation.is_empty());
    }
}
