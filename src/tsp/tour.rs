//! A candidate route: one permutation of the city set.

use super::cities::Cities;
use super::point::Point;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// An ordered permutation of a [`Cities`] set, read as a closed loop.
///
/// The order holds city ids (indices into the set); every id appears
/// exactly once. The order never changes after construction, so the total
/// distance is computed at most once and cached, and clones share the order
/// rather than copying it.
///
/// Equality compares the visiting order. Ordering by quality is available
/// through [`compare`](Self::compare), shorter first.
#[derive(Debug, Clone)]
pub struct Tour {
    cities: Cities,
    order: Arc<[usize]>,
    distance: OnceLock<u64>,
}

impl Tour {
    /// A tour visiting the cities in the order they appear in the set.
    pub fn new(cities: &Cities) -> Self {
        Self::with_order(cities, (0..cities.len()).collect())
    }

    /// A tour over `cities` in uniformly random order.
    pub fn shuffled<R: Rng + ?Sized>(cities: &Cities, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..cities.len()).collect();
        order.shuffle(rng);
        Self::with_order(cities, order)
    }

    /// Builds a tour from the set, shuffling when asked.
    pub fn from_cities<R: Rng + ?Sized>(cities: &Cities, shuffle: bool, rng: &mut R) -> Self {
        if shuffle {
            Self::shuffled(cities, rng)
        } else {
            Self::new(cities)
        }
    }

    /// Wraps an explicit visiting order.
    ///
    /// # Panics
    /// Panics if `order` is not a permutation of `0..cities.len()`.
    pub fn from_order(cities: &Cities, order: Vec<usize>) -> Self {
        assert!(
            is_permutation(&order, cities.len()),
            "tour order is not a permutation of {} cities: {order:?}",
            cities.len()
        );
        Self::with_order(cities, order)
    }

    fn with_order(cities: &Cities, order: Vec<usize>) -> Self {
        Self {
            cities: cities.clone(),
            order: order.into(),
            distance: OnceLock::new(),
        }
    }

    pub fn cities(&self) -> &Cities {
        &self.cities
    }

    /// City ids in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Points in visiting order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.order.iter().map(move |&id| &self.cities[id])
    }

    /// Total length of the closed loop, truncated to an integer.
    ///
    /// Sums consecutive legs plus the leg from the last city back to the
    /// first, then truncates the sum.
    pub fn distance(&self) -> u64 {
        *self.distance.get_or_init(|| {
            let n = self.order.len();
            if n < 2 {
                return 0;
            }
            let total: f64 = (0..n)
                .map(|i| {
                    let from = &self.cities[self.order[i]];
                    let to = &self.cities[self.order[(i + 1) % n]];
                    from.distance_to(to)
                })
                .sum();
            total as u64
        })
    }

    /// `1 / distance`. Infinite for a zero-length tour.
    pub fn fitness(&self) -> f64 {
        1.0 / self.distance() as f64
    }

    /// Orders by distance: `Less` means `self` is the shorter tour.
    pub fn compare(&self, other: &Tour) -> Ordering {
        self.distance().cmp(&other.distance())
    }
}

impl PartialEq for Tour {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Tour {}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for point in self.points() {
            write!(f, "{point}")?;
        }
        write!(f, "]")
    }
}

/// Whether `order` holds each id of `0..n` exactly once.
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    order.iter().all(|&id| id < n && !std::mem::replace(&mut seen[id], true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn two_cities() -> Cities {
        Cities::new(vec![Point::new(10, 10), Point::new(20, 20)])
    }

    #[test]
    fn test_two_city_distance() {
        // 2 * sqrt(200) = 28.28 -> 28
        assert_eq!(Tour::new(&two_cities()).distance(), 28);
    }

    #[test]
    fn test_square_distance() {
        let cities = Cities::new(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        assert_eq!(Tour::new(&cities).distance(), 40);
        // Crossing diagonals
        let crossed = Tour::from_order(&cities, vec![0, 2, 1, 3]);
        assert_eq!(crossed.distance(), 48);
    }

    #[test]
    fn test_distance_is_cached() {
        let tour = Tour::new(&Cities::fixed_layout());
        let first = tour.distance();
        assert_eq!(tour.distance.get(), Some(&first));
        assert_eq!(tour.clone().distance(), first);
    }

    #[test]
    fn test_clone_shares_order() {
        let mut rng = create_rng(42);
        let tour = Tour::shuffled(&Cities::fixed_layout(), &mut rng);
        let copy = tour.clone();
        assert!(Arc::ptr_eq(&tour.order, &copy.order));
        assert_eq!(copy, tour);
    }

    #[test]
    fn test_fitness_is_inverse_distance() {
        let tour = Tour::new(&two_cities());
        assert!((tour.fitness() - 1.0 / 28.0).abs() < 1e-12);
    }

    #[test]
    fn test_shuffle_preserves_permutation() {
        let cities = Cities::fixed_layout();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let tour = Tour::shuffled(&cities, &mut rng);
            assert!(is_permutation(tour.order(), 20));
        }
    }

    #[test]
    fn test_shuffle_changes_order() {
        let cities = Cities::fixed_layout();
        let mut rng = create_rng(42);
        let identity = Tour::new(&cities);
        assert!((0..10).any(|_| Tour::shuffled(&cities, &mut rng) != identity));
    }

    #[test]
    fn test_compare() {
        let cities = Cities::new(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        let good = Tour::new(&cities);
        let bad = Tour::from_order(&cities, vec![0, 2, 1, 3]);
        assert_eq!(good.compare(&bad), Ordering::Less);
        assert_eq!(bad.compare(&good), Ordering::Greater);
        assert_eq!(good.compare(&good.clone()), Ordering::Equal);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let cities = Cities::fixed_layout();
        let a = Tour::new(&cities);
        let mut reversed: Vec<usize> = (0..20).collect();
        reversed.reverse();
        let b = Tour::from_order(&cities, reversed);
        // Same loop length, same set, different order
        assert_eq!(a.distance(), b.distance());
        assert_ne!(a, b);
        assert_eq!(a, Tour::new(&cities));
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn test_from_order_rejects_duplicates() {
        Tour::from_order(&Cities::fixed_layout(), vec![0; 20]);
    }

    #[test]
    fn test_single_city() {
        let cities = Cities::new(vec![Point::new(3, 4)]);
        assert_eq!(Tour::new(&cities).distance(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tour::new(&two_cities()).to_string(), "[(10,10)(20,20)]");
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[2, 0, 0], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(is_permutation(&[], 0));
    }
}
