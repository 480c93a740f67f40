//! Genetic algorithm engine for the Traveling Salesman Problem.
//!
//! Evolves closed tours over a fixed set of 2-D cities toward a short total
//! distance:
//!
//! - **TSP model** ([`tsp`]): points, the shared city set, tours with a
//!   cached distance, and a bounded population ordered by distance.
//! - **Genetic Algorithm** ([`ga`]): tournament, roulette and ranked
//!   selection; five permutation crossovers; swap mutation; elitism; and the
//!   generation loop with per-generation statistics.
//!
//! All randomness flows through an explicit generator (see [`random`]), so
//! a seeded run is reproducible.
//!
//! # Features
//!
//! - `parallel`: [`ga::run_trials`] runs independent trials on rayon.
//!
//! # Example
//!
//! ```
//! use u_tspga::ga::{GaConfig, GaRunner, Selection};
//! use u_tspga::random::create_rng;
//! use u_tspga::tsp::Population;
//!
//! let population = Population::random(25, 80, true, &mut create_rng(3));
//! let config = GaConfig::default()
//!     .with_generations(50)
//!     .with_elite_count(4)
//!     .with_selection(Selection::Tournament(5))
//!     .with_seed(42);
//!
//! let result = GaRunner::with_population(config, population).run();
//! assert!(result.best_last_generation <= result.best_first_generation);
//! ```

pub mod error;
pub mod ga;
pub mod random;
pub mod tsp;
