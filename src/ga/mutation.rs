//! Swap mutation.
//!
//! A mutation never touches its input: it reads a tour and returns a new
//! one whose order differs by a few random position swaps.

use crate::tsp::Tour;
use rand::Rng;

/// Swaps applied per mutation unless configured otherwise.
pub const DEFAULT_SWAPS: usize = 3;

/// Exchange two random positions in place.
///
/// The positions are drawn independently and may coincide, in which case
/// the swap is a no-op.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng + ?Sized>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

/// Returns a copy of `tour` after `swaps` random swaps.
pub fn mutate<R: Rng + ?Sized>(tour: &Tour, swaps: usize, rng: &mut R) -> Tour {
    let mut order = tour.order().to_vec();
    for _ in 0..swaps {
        swap_mutation(&mut order, rng);
    }
    Tour::from_order(tour.cities(), order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tsp::{is_permutation, Cities};
    use proptest::prelude::*;

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        for _ in 0..200 {
            swap_mutation(&mut perm, &mut rng);
            assert!(is_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_small_inputs() {
        let mut rng = create_rng(42);
        let mut empty: Vec<usize> = vec![];
        swap_mutation(&mut empty, &mut rng);
        let mut one = vec![0];
        swap_mutation(&mut one, &mut rng);
        assert_eq!(one, vec![0]);
    }

    #[test]
    fn test_mutate_leaves_input_alone() {
        let mut rng = create_rng(42);
        let cities = Cities::fixed_layout();
        let original = Tour::new(&cities);
        let snapshot = original.order().to_vec();
        let mutated = mutate(&original, DEFAULT_SWAPS, &mut rng);

        assert_eq!(original.order(), snapshot.as_slice());
        assert!(is_permutation(mutated.order(), 20));
        assert!(mutated.cities().same_set(&cities));
    }

    #[test]
    fn test_mutate_moves_at_most_six_positions() {
        let mut rng = create_rng(9);
        let cities = Cities::fixed_layout();
        let original = Tour::new(&cities);
        for _ in 0..100 {
            let mutated = mutate(&original, 3, &mut rng);
            let moved = original
                .order()
                .iter()
                .zip(mutated.order())
                .filter(|(a, b)| a != b)
                .count();
            assert!(moved <= 6, "{moved} positions moved");
        }
    }

    #[test]
    fn test_mutate_usually_changes_order() {
        let mut rng = create_rng(42);
        let original = Tour::new(&Cities::fixed_layout());
        let changed = (0..50)
            .filter(|_| mutate(&original, 3, &mut rng) != original)
            .count();
        assert!(changed > 40, "only {changed} of 50 mutations changed the tour");
    }

    #[test]
    fn test_zero_swaps_is_identity() {
        let mut rng = create_rng(42);
        let original = Tour::shuffled(&Cities::fixed_layout(), &mut rng);
        assert_eq!(mutate(&original, 0, &mut rng), original);
    }

    proptest! {
        #[test]
        fn prop_swaps_keep_permutation(
            perm in (1usize..=100).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle()),
            swaps in 0usize..10,
            seed in any::<u64>(),
        ) {
            let n = perm.len();
            let mut rng = create_rng(seed);
            let mut mutated = perm.clone();
            for _ in 0..swaps {
                swap_mutation(&mut mutated, &mut rng);
            }
            prop_assert!(is_permutation(&mutated, n));
        }
    }
}
