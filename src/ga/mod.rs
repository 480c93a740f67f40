//! Genetic algorithm for the TSP.
//!
//! Strategies are chosen through small enums that double as registries:
//! [`Selection::selector`] builds a [`ParentSelector`] and
//! [`Crossover::operator`] returns a [`CrossoverOperator`]. New operators
//! plug in by implementing the trait and adding a variant.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (generations, elites, rates, operators)
//! - [`GaRunner`]: Executes the evolutionary loop over one population
//! - [`GaResult`]: Final and per-generation best/average distances
//!
//! # Submodules
//!
//! - [`crossover`]: PMX, cycle, alternating position, OX1 and edge recombination
//! - [`mutation`]: Swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod crossover;
pub mod mutation;
mod runner;
mod selection;
#[cfg(feature = "parallel")]
mod trials;

pub use config::GaConfig;
pub use crossover::{Crossover, CrossoverOperator};
pub use runner::{
    GaResult, GaRunner, GenerationStats, DEFAULT_NUM_CITIES, DEFAULT_POPULATION_SIZE,
    FALLBACK_NUM_CITIES, FALLBACK_POPULATION_SIZE, MAX_RESELECT_ATTEMPTS,
};
pub use selection::{ParentSelector, Ranked, Roulette, Selection, Tournament, UNDERDOG_ODDS};
#[cfg(feature = "parallel")]
pub use trials::{run_trials, TrialSummary};
