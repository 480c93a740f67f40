//! The shared, immutable set of cities a tour permutes.

use super::point::Point;
use crate::error::LoadError;
use rand::Rng;
use std::ops::Index;
use std::path::Path;
use std::sync::Arc;

/// The 20-city reference layout.
const FIXED_LAYOUT: [(i32, i32); 20] = [
    (60, 200),
    (180, 200),
    (80, 180),
    (140, 180),
    (20, 160),
    (100, 160),
    (200, 160),
    (140, 140),
    (40, 120),
    (100, 120),
    (180, 100),
    (60, 80),
    (120, 80),
    (180, 60),
    (20, 40),
    (100, 40),
    (200, 40),
    (20, 20),
    (60, 20),
    (160, 20),
];

/// An immutable city set shared by every tour built over it.
///
/// A city's identity is its index in the set, so two cities with equal
/// coordinates remain distinct. Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq)]
pub struct Cities {
    points: Arc<[Point]>,
}

impl Cities {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// `n` cities at random coordinates.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        Self::new((0..n).map(|_| Point::random(rng)).collect())
    }

    /// The fixed 20-city layout used for repeatable experiments.
    pub fn fixed_layout() -> Self {
        Self::new(
            FIXED_LAYOUT
                .iter()
                .map(|&(x, y)| Point::new(x, y))
                .collect(),
        )
    }

    /// Reads cities from a text file; see [`parse`](Self::parse).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses one city per line as two whitespace-separated integers, `x`
    /// then `y`. Blank lines are skipped; anything else is malformed.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut points = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let malformed = || LoadError::Malformed {
                line: i + 1,
                content: line.to_string(),
            };
            let mut fields = trimmed.split_whitespace();
            let x = fields.next().and_then(|f| f.parse::<i32>().ok());
            let y = fields.next().and_then(|f| f.parse::<i32>().ok());
            match (x, y, fields.next()) {
                (Some(x), Some(y), None) => points.push(Point::new(x, y)),
                _ => return Err(malformed()),
            }
        }
        if points.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self::new(points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether `other` is the very same set (not merely equal coordinates).
    pub fn same_set(&self, other: &Cities) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}

impl Index<usize> for Cities {
    type Output = Point;

    fn index(&self, id: usize) -> &Point {
        &self.points[id]
    }
}
