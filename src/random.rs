//! Seedable randomness shared by every operator.
//!
//! All randomized code in this crate takes its generator as an explicit
//! argument. [`create_rng`] is the one place a generator is constructed, so a
//! fixed seed reproduces a whole run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from `seed`.
///
/// ```
/// use rand::Rng;
/// use u_tspga::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Bernoulli trial with the `draw <= probability` convention.
///
/// A non-positive probability never hits; values above 1.0 always hit.
pub fn is_hit<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    probability > 0.0 && rng.random::<f64>() <= probability
}
