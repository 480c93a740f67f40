//! Parent selection strategies.
//!
//! Selection determines which tours are chosen as parents for crossover.
//! Each strategy is a stateless [`ParentSelector`]; the [`Selection`] enum
//! names them and builds the matching selector.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::ParseError;
use crate::tsp::{Population, Tour};
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// One in this many tournaments hands the win to a random non-winner.
pub const UNDERDOG_ODDS: u32 = 5;

/// Picks one parent from a population.
///
/// Implementations never modify the population.
pub trait ParentSelector: Send + Sync {
    /// Selects a parent.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    fn select<'a>(&self, population: &'a Population, rng: &mut dyn RngCore) -> &'a Tour;
}

/// Selection strategy for choosing parents.
///
/// All strategies prefer shorter tours.
///
/// # Examples
///
/// ```
/// use u_tspga::ga::Selection;
///
/// // Tournament with sample size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Parsed from its short name
/// let sel: Selection = "ranked".parse().unwrap();
/// assert_eq!(sel, Selection::Ranked);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection over `k` entrants drawn with replacement.
    ///
    /// Higher `k` = stronger selection pressure. When `k > 1`, one in
    /// [`UNDERDOG_ODDS`] tournaments is won by a random non-winner, which
    /// keeps weaker tours in the gene pool.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection on `1 / distance`.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Rank-based selection.
    ///
    /// Members ordered worst to best get weights `1, 2, ..., n`, so the
    /// chance of selection depends on position, not on raw distance.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n) per selection
    Ranked,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Builds the selector for this strategy.
    pub fn selector(&self) -> Box<dyn ParentSelector> {
        match *self {
            Selection::Tournament(k) => Box::new(Tournament::new(k)),
            Selection::Roulette => Box::new(Roulette),
            Selection::Ranked => Box::new(Ranked),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Tournament(k) => write!(f, "tournament({k})"),
            Selection::Roulette => write!(f, "roulette"),
            Selection::Ranked => write!(f, "ranked"),
        }
    }
}

impl FromStr for Selection {
    type Err = ParseError;

    /// Parses `tournament`, `tournament(k)`, `roulette` or `ranked`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "tournament" => Ok(Selection::default()),
            "roulette" => Ok(Selection::Roulette),
            "ranked" | "rank" => Ok(Selection::Ranked),
            _ => s
                .strip_prefix("tournament(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|k| k.trim().parse().ok())
                .map(Selection::Tournament)
                .ok_or_else(|| ParseError::UnknownSelection(s.clone())),
        }
    }
}

fn assert_not_empty(population: &Population) {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
}

/// Tournament selection with an underdog escape.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    sample_size: usize,
}

impl Tournament {
    /// A sample size of 0 is treated as 1.
    pub fn new(sample_size: usize) -> Self {
        Self {
            sample_size: sample_size.max(1),
        }
    }
}

impl ParentSelector for Tournament {
    fn select<'a>(&self, population: &'a Population, rng: &mut dyn RngCore) -> &'a Tour {
        assert_not_empty(population);
        let members = population.as_slice();
        let n = members.len();

        let mut entrants: Vec<usize> = (0..self.sample_size)
            .map(|_| rng.random_range(0..n))
            .collect();

        let mut winner = 0;
        for (pos, &idx) in entrants.iter().enumerate().skip(1) {
            if members[idx].distance() < members[entrants[winner]].distance() {
                winner = pos;
            }
        }

        if entrants.len() > 1 && rng.random_range(0..UNDERDOG_ODDS) == 0 {
            entrants.swap_remove(winner);
            return &members[entrants[rng.random_range(0..entrants.len())]];
        }
        &members[entrants[winner]]
    }
}

/// Roulette wheel selection on `1 / distance`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roulette;

impl ParentSelector for Roulette {
    fn select<'a>(&self, population: &'a Population, rng: &mut dyn RngCore) -> &'a Tour {
        assert_not_empty(population);
        let members = population.as_slice();
        let n = members.len();
        if n == 1 {
            return &members[0];
        }

        let fitness: Vec<f64> = members.iter().map(Tour::fitness).collect();
        let total: f64 = fitness.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            // Zero-length tours make the wheel meaningless.
            return &members[rng.random_range(0..n)];
        }

        let mut running = 0.0;
        let cumulative: Vec<f64> = fitness
            .iter()
            .map(|f| {
                running += f / total;
                running
            })
            .collect();

        let point: f64 = rng.random();
        if point < cumulative[0] {
            return &members[0];
        }
        let idx = cumulative
            .iter()
            .position(|&c| c >= point)
            .unwrap_or(n - 1); // floating-point fallback
        &members[idx]
    }
}

/// Linear rank selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranked;

impl ParentSelector for Ranked {
    fn select<'a>(&self, population: &'a Population, rng: &mut dyn RngCore) -> &'a Tour {
        assert_not_empty(population);
        // Members are stored best first; rank i counts from the worst.
        let members = population.as_slice();
        let n = members.len();

        let total = n * (n + 1) / 2;
        let stop = rng.random_range(0..total);
        let mut running = 0;
        for rank in 0..n {
            running += rank + 1;
            if running >= stop {
                return &members[n - 1 - rank];
            }
        }
        &members[0]
    }
}
