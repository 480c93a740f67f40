//! Permutation crossover operators.
//!
//! Every operator combines two parent orders into two child orders and
//! guarantees each child is again a permutation of the same city ids. The
//! operators work on `&[usize]` id slices; [`CrossoverOperator::combine`]
//! lifts them to [`Tour`]s.
//!
//! # Operators
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), prefix copy with
//!   swap repair
//! - [`cycle_crossover`] (CX): Oliver et al. (1987), one position cycle
//!   from each parent
//! - [`alternating_position_crossover`] (APC): Larrañaga et al. (1997),
//!   genes taken alternately from both parents
//! - [`order_crossover`] (OX1): Davis (1985), segment copy with cyclic fill
//! - [`edge_recombination`] (ERX): Whitley et al. (1989), builds the child
//!   from the union of parent adjacencies
//!
//! Scratch state (positions, placed flags, neighbor lists) is local to each
//! call. Parents are never modified.
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

use crate::error::ParseError;
use crate::tsp::Tour;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Marks an unfilled child slot.
const EMPTY: usize = usize::MAX;

/// Combines two parents into two children.
pub trait CrossoverOperator: Send + Sync {
    /// Crosses two orders over the ids `0..n`.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    fn crossover(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut dyn RngCore,
    ) -> (Vec<usize>, Vec<usize>);

    /// Crosses two tours over the same city set.
    fn combine(&self, parent1: &Tour, parent2: &Tour, rng: &mut dyn RngCore) -> (Tour, Tour) {
        debug_assert!(
            parent1.cities().same_set(parent2.cities()) || parent1.cities() == parent2.cities(),
            "parents must share one city set"
        );
        let (child1, child2) = self.crossover(parent1.order(), parent2.order(), rng);
        let cities = parent1.cities();
        (
            Tour::from_order(cities, child1),
            Tour::from_order(cities, child2),
        )
    }
}

/// Crossover operator choice.
///
/// # Examples
///
/// ```
/// use u_tspga::ga::Crossover;
///
/// let op: Crossover = "ox1".parse().unwrap();
/// assert_eq!(op, Crossover::Order);
/// assert_eq!(op.to_string(), "ox1");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Crossover {
    /// Partially matched crossover.
    #[default]
    Pmx,
    /// Cycle crossover.
    Cycle,
    /// Alternating position crossover.
    AlternatingPosition,
    /// First order crossover.
    Order,
    /// Edge recombination.
    EdgeRecombination,
}

impl Crossover {
    /// Every operator, in a stable order.
    pub const ALL: [Crossover; 5] = [
        Crossover::Pmx,
        Crossover::Cycle,
        Crossover::AlternatingPosition,
        Crossover::Order,
        Crossover::EdgeRecombination,
    ];

    /// The operator implementing this choice.
    pub fn operator(&self) -> &'static dyn CrossoverOperator {
        match self {
            Crossover::Pmx => &PartiallyMatched,
            Crossover::Cycle => &CycleCrossover,
            Crossover::AlternatingPosition => &AlternatingPosition,
            Crossover::Order => &OrderCrossover,
            Crossover::EdgeRecombination => &EdgeRecombination,
        }
    }

    /// Short name: `pmx`, `cco`, `apc`, `ox1` or `erx`.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::Pmx => "pmx",
            Crossover::Cycle => "cco",
            Crossover::AlternatingPosition => "apc",
            Crossover::Order => "ox1",
            Crossover::EdgeRecombination => "erx",
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crossover {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pmx" => Ok(Crossover::Pmx),
            "cco" | "cx" | "cycle" => Ok(Crossover::Cycle),
            "apc" => Ok(Crossover::AlternatingPosition),
            "ox1" | "ox" => Ok(Crossover::Order),
            "erx" | "erc" => Ok(Crossover::EdgeRecombination),
            other => Err(ParseError::UnknownCrossover(other.to_string())),
        }
    }
}

/// PMX as a [`CrossoverOperator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartiallyMatched;

impl CrossoverOperator for PartiallyMatched {
    fn crossover(&self, p1: &[usize], p2: &[usize], rng: &mut dyn RngCore) -> (Vec<usize>, Vec<usize>) {
        pmx_crossover(p1, p2, rng)
    }
}

/// Cycle crossover as a [`CrossoverOperator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleCrossover;

impl CrossoverOperator for CycleCrossover {
    fn crossover(&self, p1: &[usize], p2: &[usize], _rng: &mut dyn RngCore) -> (Vec<usize>, Vec<usize>) {
        cycle_crossover(p1, p2)
    }
}

/// APC as a [`CrossoverOperator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternatingPosition;

impl CrossoverOperator for AlternatingPosition {
    fn crossover(&self, p1: &[usize], p2: &[usize], _rng: &mut dyn RngCore) -> (Vec<usize>, Vec<usize>) {
        alternating_position_crossover(p1, p2)
    }
}

/// OX1 as a [`CrossoverOperator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCrossover;

impl CrossoverOperator for OrderCrossover {
    fn crossover(&self, p1: &[usize], p2: &[usize], rng: &mut dyn RngCore) -> (Vec<usize>, Vec<usize>) {
        order_crossover(p1, p2, rng)
    }
}

/// ERX as a [`CrossoverOperator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeRecombination;

impl CrossoverOperator for EdgeRecombination {
    fn crossover(&self, p1: &[usize], p2: &[usize], rng: &mut dyn RngCore) -> (Vec<usize>, Vec<usize>) {
        edge_recombination(p1, p2, rng)
    }
}

// ============================================================================
// PMX
// ============================================================================

/// Partially Matched Crossover (PMX).
///
/// Each child draws a cut point `k` in `[0, n)`. Positions `[0, k)` take the
/// donor's genes; a scratch copy of the template is kept consistent by
/// swapping each copied gene into place, and positions `[k, n)` are read
/// from that scratch copy.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn pmx_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let k1 = rng.random_range(0..n);
    let child1 = pmx_build_child(parent1, parent2, k1);
    let k2 = rng.random_range(0..n);
    let child2 = pmx_build_child(parent2, parent1, k2);

    (child1, child2)
}

/// Build one PMX child: prefix `[0, cut)` from `donor`, rest from the
/// swap-repaired copy of `template`.
fn pmx_build_child(template: &[usize], donor: &[usize], cut: usize) -> Vec<usize> {
    let mut scratch = template.to_vec();
    let mut position = positions(&scratch);

    for i in 0..cut {
        let j = locate(&position, donor[i]);
        scratch.swap(i, j);
        position[scratch[i]] = i;
        position[scratch[j]] = j;
    }

    // scratch[..cut] now equals donor[..cut]
    scratch
}

// ============================================================================
// Cycle crossover
// ============================================================================

/// Cycle Crossover (CX).
///
/// Starting at index 0, follows the position cycle linking the parents and
/// copies it from the first parent; every other position comes from the
/// second parent. Deterministic.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn cycle_crossover(parent1: &[usize], parent2: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    (
        cycle_build_child(parent1, parent2),
        cycle_build_child(parent2, parent1),
    )
}

fn cycle_build_child(first: &[usize], second: &[usize]) -> Vec<usize> {
    let n = first.len();
    let position = positions(first);
    let mut child = vec![EMPTY; n];
    let mut placed = vec![false; n];

    let mut idx = 0;
    while !placed[first[idx]] {
        child[idx] = first[idx];
        placed[first[idx]] = true;
        // Jump to where `first` holds the city `second` has here.
        idx = locate(&position, second[idx]);
    }

    for (slot, &city) in child.iter_mut().zip(second) {
        if *slot == EMPTY {
            *slot = city;
        }
    }

    finish(child)
}

// ============================================================================
// Alternating position crossover
// ============================================================================

/// Alternating Position Crossover (APC).
///
/// Reads both parents position by position, alternately appending the
/// first parent's gene then the second's, skipping genes already present.
/// Deterministic.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn alternating_position_crossover(
    parent1: &[usize],
    parent2: &[usize],
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    (
        apc_build_child(parent1, parent2),
        apc_build_child(parent2, parent1),
    )
}

fn apc_build_child(first: &[usize], second: &[usize]) -> Vec<usize> {
    let n = first.len();
    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    let mut read = 0;
    while child.len() < n {
        for city in [first[read], second[read]] {
            if child.len() < n && !placed[city] {
                placed[city] = true;
                child.push(city);
            }
        }
        read += 1;
    }

    child
}

// ============================================================================
// Order crossover
// ============================================================================

/// First Order Crossover (OX1).
///
/// Preserves the **relative order** of elements from both parents.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select cut points `a <= b` (the second is redrawn until `b >= a`)
/// 2. Copy the first parent's segment `[a, b]` to the child at the same
///    positions
/// 3. Scan the second parent cyclically from `b + 1`, placing each city not
///    yet in the child into the next empty slot, also from `b + 1` and
///    wrapping to 0
///
/// Each child draws its own cut points.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn order_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (a, b) = ordered_cut_points(n, rng);
    let child1 = ox_build_child(parent1, parent2, a, b);
    let (a, b) = ordered_cut_points(n, rng);
    let child2 = ox_build_child(parent2, parent1, a, b);

    (child1, child2)
}

/// Build one OX1 child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![EMPTY; n];
    let mut placed = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    // Both cursors run from end + 1 modulo n.
    let mut slot = (end + 1) % n;
    for offset in 0..n {
        let city = donor[(end + 1 + offset) % n];
        if !placed[city] {
            placed[city] = true;
            child[slot] = city;
            slot = (slot + 1) % n;
        }
    }

    finish(child)
}

/// Draws `a` in `[0, n)`, then redraws `b` until `b >= a`.
fn ordered_cut_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    loop {
        let b = rng.random_range(0..n);
        if b >= a {
            return (a, b);
        }
    }
}

// ============================================================================
// Edge recombination
// ============================================================================

/// Edge Recombination Crossover (ERX).
///
/// Builds a neighbor table holding, for each city, its cyclic neighbors in
/// both parents. The child starts from the first city of a randomly chosen
/// parent and always moves to the remaining neighbor with the fewest
/// remaining neighbors (ties broken uniformly at random), or to a random
/// unvisited city when the current city has none left. The second child
/// repeats the process with the parent roles swapped on a fresh table.
///
/// # Complexity
/// O(n²) time in the worst case, O(n) space
pub fn edge_recombination<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let child1 = erx_build_child(parent1, parent2, rng);
    let child2 = erx_build_child(parent2, parent1, rng);
    (child1, child2)
}

/// Union of each city's left and right neighbors in both parents.
fn neighbor_table(parent1: &[usize], parent2: &[usize]) -> Vec<Vec<usize>> {
    let n = parent1.len();
    let mut table = vec![Vec::with_capacity(4); n];
    for parent in [parent1, parent2] {
        for i in 0..n {
            // Left is i - 1 and right is i + 1, both modulo n.
            let left = parent[(i + n - 1) % n];
            let right = parent[(i + 1) % n];
            let neighbors = &mut table[parent[i]];
            for city in [left, right] {
                if !neighbors.contains(&city) {
                    neighbors.push(city);
                }
            }
        }
    }
    table
}

fn erx_build_child<R: Rng + ?Sized>(
    first: &[usize],
    second: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = first.len();
    let mut table = neighbor_table(first, second);
    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    let mut current = if rng.random_bool(0.5) {
        first[0]
    } else {
        second[0]
    };

    loop {
        child.push(current);
        placed[current] = true;
        if child.len() == n {
            break;
        }

        for neighbors in table.iter_mut() {
            neighbors.retain(|&city| city != current);
        }

        let candidates = &table[current];
        current = if candidates.is_empty() {
            let unvisited: Vec<usize> = (0..n).filter(|&city| !placed[city]).collect();
            *unvisited
                .choose(rng)
                .expect("an unvisited city remains while the child is incomplete")
        } else {
            let fewest = candidates
                .iter()
                .map(|&city| table[city].len())
                .min()
                .unwrap_or(0);
            let ties: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&city| table[city].len() == fewest)
                .collect();
            *ties
                .choose(rng)
                .expect("at least one candidate has the fewest neighbors")
        };
    }

    child
}

// ============================================================================
// Helpers
// ============================================================================

/// Asserts equal parent lengths and returns that length.
fn check_parents(parent1: &[usize], parent2: &[usize]) -> usize {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    parent1.len()
}

/// `position[city]` = index of `city` in `perm`.
fn positions(perm: &[usize]) -> Vec<usize> {
    let mut position = vec![EMPTY; perm.len()];
    for (i, &city) in perm.iter().enumerate() {
        *position
            .get_mut(city)
            .expect("city id out of range: parents are not permutations of 0..n") = i;
    }
    position
}

/// Index of `city` in the permutation that `position` was built from.
fn locate(position: &[usize], city: usize) -> usize {
    match position.get(city) {
        Some(&idx) if idx != EMPTY => idx,
        _ => panic!("city {city} missing from parent: parents are not permutations of one city set"),
    }
}

/// Asserts that every slot was filled.
fn finish(child: Vec<usize>) -> Vec<usize> {
    assert!(
        !child.contains(&EMPTY),
        "crossover left an unfilled slot: {child:?}"
    );
    child
}

// ============================================================================
// Tests
// ============================================================================
