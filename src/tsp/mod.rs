//! TSP problem model.
//!
//! - [`Point`]: an integer 2-D city coordinate
//! - [`Cities`]: the immutable city set shared by every tour over it
//! - [`Tour`]: a permutation of the city set with a cached loop distance
//! - [`Population`]: a bounded, distance-ordered multiset of tours

mod cities;
mod point;
mod population;
mod tour;

pub use cities::Cities;
pub use point::{Point, COORDINATE_LIMIT};
pub use population::Population;
pub use tour::{is_permutation, Tour};
