//! Bounded, distance-ordered collection of tours.

use super::cities::Cities;
use super::tour::Tour;
use crate::error::LoadError;
use rand::Rng;
use std::fmt;
use std::path::Path;

/// A multiset of tours with a fixed capacity.
///
/// Members are kept sorted by ascending distance, so the fittest tour is
/// always at the front and iteration yields best-to-worst. Tours with equal
/// distance keep insertion order.
#[derive(Debug, Clone)]
pub struct Population {
    capacity: usize,
    tours: Vec<Tour>,
}

impl Population {
    /// An empty population that will hold at most `capacity` tours.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tours: Vec::with_capacity(capacity),
        }
    }

    /// `size` tours over `num_cities` freshly generated random cities.
    pub fn random<R: Rng + ?Sized>(
        num_cities: usize,
        size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Self {
        let cities = Cities::random(num_cities, rng);
        Self::from_cities(&cities, size, shuffle, rng)
    }

    /// `size` tours over the fixed 20-city layout.
    pub fn fixed<R: Rng + ?Sized>(size: usize, shuffle: bool, rng: &mut R) -> Self {
        Self::from_cities(&Cities::fixed_layout(), size, shuffle, rng)
    }

    /// `size` tours over cities read from `path`.
    pub fn from_file<R: Rng + ?Sized>(
        path: impl AsRef<Path>,
        size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self, LoadError> {
        let cities = Cities::from_file(path)?;
        Ok(Self::from_cities(&cities, size, shuffle, rng))
    }

    /// A full population of `size` tours over `cities`.
    pub fn from_cities<R: Rng + ?Sized>(
        cities: &Cities,
        size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Self {
        let mut population = Self::new(size);
        population.populate(cities, shuffle, rng);
        population
    }

    /// Inserts `tour` keeping distance order.
    ///
    /// Returns `false` and leaves the population untouched when it is
    /// already at capacity.
    pub fn add(&mut self, tour: Tour) -> bool {
        if self.is_full() {
            tracing::warn!(capacity = self.capacity, "population already full, tour rejected");
            return false;
        }
        let distance = tour.distance();
        let at = self.tours.partition_point(|t| t.distance() <= distance);
        self.tours.insert(at, tour);
        true
    }

    /// Adds tours over `cities` until the population is full.
    pub fn populate<R: Rng + ?Sized>(&mut self, cities: &Cities, shuffle: bool, rng: &mut R) {
        if self.is_full() {
            tracing::warn!(capacity = self.capacity, "population full, nothing to populate");
            return;
        }
        while !self.is_full() {
            self.add(Tour::from_cities(cities, shuffle, rng));
        }
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.tours.len() >= self.capacity
    }

    /// The shortest tour.
    pub fn fittest(&self) -> Option<&Tour> {
        self.tours.first()
    }

    /// Removes and returns the shortest tour.
    pub fn pop_fittest(&mut self) -> Option<Tour> {
        if self.tours.is_empty() {
            None
        } else {
            Some(self.tours.remove(0))
        }
    }

    /// Distance of the shortest tour.
    pub fn best_distance(&self) -> Option<u64> {
        self.fittest().map(Tour::distance)
    }

    /// Mean distance over all members, truncated.
    pub fn average_distance(&self) -> Option<u64> {
        if self.tours.is_empty() {
            return None;
        }
        let total: u64 = self.tours.iter().map(Tour::distance).sum();
        Some(total / self.tours.len() as u64)
    }

    /// A uniformly random member.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Tour> {
        if self.tours.is_empty() {
            return None;
        }
        Some(&self.tours[rng.random_range(0..self.tours.len())])
    }

    /// The city set of the fittest tour.
    pub fn cities(&self) -> Option<&Cities> {
        self.fittest().map(Tour::cities)
    }

    /// Members from shortest to longest.
    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    /// Members as a slice, shortest first.
    pub fn as_slice(&self) -> &[Tour] {
        &self.tours
    }

    /// A population with the same capacity and the same members.
    ///
    /// Members share their order storage with the originals.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Removes every member; capacity is unchanged.
    pub fn clear(&mut self) {
        self.tours.clear();
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Population:")?;
        for tour in &self.tours {
            write!(f, "\n{tour} Distance: {}", tour.distance())?;
        }
        Ok(())
    }
}
