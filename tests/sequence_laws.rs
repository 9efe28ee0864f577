//! Property-based tests for the sequential transforms.

use functools::sequence::{filter, find_first, fold, map, reduce};
use proptest::prelude::*;

// =============================================================================
// map Laws
// =============================================================================

proptest! {
    /// map preserves length and applies the function at every index
    #[test]
    fn prop_map_pointwise(input in prop::collection::vec(any::<i32>(), 0..100)) {
        let function = |x: &i32| x.wrapping_mul(3).wrapping_add(1);
        let result = map(function, &input);

        prop_assert_eq!(result.len(), input.len());
        for (index, element) in input.iter().enumerate() {
            prop_assert_eq!(result[index], function(element));
        }
    }
}

proptest! {
    /// Identity: map(id) == xs
    #[test]
    fn prop_map_identity(input in prop::collection::vec(any::<i64>(), 0..100)) {
        prop_assert_eq!(map(|x| *x, &input), input);
    }
}

proptest! {
    /// Composition: map(g . f) == map(g) . map(f)
    #[test]
    fn prop_map_composition(input in prop::collection::vec(any::<i32>(), 0..100)) {
        let first = |x: &i32| i64::from(*x) + 7;
        let second = |x: &i64| x * 2;

        let fused = map(|x| second(&first(x)), &input);
        let chained = map(second, &map(first, &input));
        prop_assert_eq!(fused, chained);
    }
}

// =============================================================================
// filter Laws
// =============================================================================

proptest! {
    /// filter never grows, keeps only matches, and preserves relative order
    #[test]
    fn prop_filter_is_ordered_subsequence(input in prop::collection::vec(any::<i16>(), 0..100)) {
        let predicate = |x: &i16| x % 3 == 0;
        let result = filter(predicate, &input);

        prop_assert!(result.len() <= input.len());
        prop_assert!(result.iter().all(predicate));

        let expected: Vec<i16> = input.iter().copied().filter(|x| predicate(x)).collect();
        prop_assert_eq!(result, expected);
    }
}

proptest! {
    /// filter(p) . filter(q) == filter(p && q)
    #[test]
    fn prop_filter_fusion(input in prop::collection::vec(any::<i32>(), 0..100)) {
        let positive = |x: &i32| *x > 0;
        let even = |x: &i32| x % 2 == 0;

        let chained = filter(even, &filter(positive, &input));
        let fused = filter(|x| positive(x) && even(x), &input);
        prop_assert_eq!(chained, fused);
    }
}

// =============================================================================
// reduce / fold Laws
// =============================================================================

proptest! {
    /// reduce equals a left fold seeded with the first element
    #[test]
    fn prop_reduce_is_left_fold(input in prop::collection::vec(-1000i64..1000, 1..50)) {
        let combine = |accumulator: i64, x: &i64| accumulator.wrapping_mul(3).wrapping_sub(*x);
        let expected = input[1..].iter().fold(input[0], combine);
        prop_assert_eq!(reduce(combine, &input), expected);
    }
}

proptest! {
    /// fold agrees with Iterator::fold
    #[test]
    fn prop_fold_matches_iterator_fold(
        init in any::<i32>(),
        input in prop::collection::vec(any::<i32>(), 0..100),
    ) {
        let combine = |accumulator: i32, x: &i32| accumulator.wrapping_add(*x);
        prop_assert_eq!(fold(combine, init, &input), input.iter().fold(init, combine));
    }
}

// =============================================================================
// find_first Laws
// =============================================================================

proptest! {
    /// find_first returns the element at the first matching position
    #[test]
    fn prop_find_first_matches_position(
        input in prop::collection::vec(0u8..20, 0..100),
        target in 0u8..20,
    ) {
        let found = find_first(|x| *x == target, &input);
        let position = input.iter().position(|x| *x == target);
        prop_assert_eq!(found, position.map(|index| &input[index]));
    }
}
