//! City coordinates.

use rand::Rng;
use std::fmt;

/// Upper bound (exclusive) for randomly generated coordinates.
pub const COORDINATE_LIMIT: i32 = 5000;

/// An immutable 2-D integer coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A point with both coordinates uniform in `[0, COORDINATE_LIMIT)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.random_range(0..COORDINATE_LIMIT),
            y: rng.random_range(0..COORDINATE_LIMIT),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        // Widen first: i32 differences can overflow.
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_distance_345() {
        let a = Point::new(17, 16);
        let b = Point::new(20, 20);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Point::new(-3, 9);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_distance_far_apart() {
        let a = Point::new(2_000_000_000, 0);
        let b = Point::new(-2_000_000_000, 0);
        assert_eq!(a.distance_to(&b), 4_000_000_000.0);

        let c = Point::new(i32::MIN, i32::MIN);
        let d = Point::new(i32::MAX, i32::MAX);
        let side = f64::from(i32::MAX) - f64::from(i32::MIN);
        assert!((c.distance_to(&d) - side * 2f64.sqrt()).abs() < 1.0);
    }

    #[test]
    fn test_random_within_limits() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let p = Point::random(&mut rng);
            assert!((0..COORDINATE_LIMIT).contains(&p.x()));
            assert!((0..COORDINATE_LIMIT).contains(&p.y()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(60, 200).to_string(), "(60,200)");
    }
}
