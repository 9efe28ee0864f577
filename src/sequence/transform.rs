//! `map`, `filter` and the left folds.

/// Applies `function` to every element, returning the results in order.
///
/// The output has the same length as the input and `function` is called
/// exactly once per element, in index order.
///
/// # Examples
///
/// ```rust
/// use functools::sequence::map;
///
/// let lengths = map(|word: &&str| word.len(), &["a", "bb", "ccc"]);
/// assert_eq!(lengths, vec![1, 2, 3]);
/// ```
pub fn map<A, B, F>(mut function: F, elements: &[A]) -> Vec<B>
where
    F: FnMut(&A) -> B,
{
    let mut results = Vec::with_capacity(elements.len());
    for element in elements {
        results.push(function(element));
    }
    results
}

/// Returns the elements for which `predicate` holds, in their original order.
///
/// The result is never longer than the input.
///
/// # Examples
///
/// ```rust
/// use functools::sequence::filter;
///
/// let evens = filter(|number| number % 2 == 0, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
/// assert_eq!(evens, vec![2, 4, 6, 8, 10]);
/// ```
pub fn filter<A, F>(mut predicate: F, elements: &[A]) -> Vec<A>
where
    A: Clone,
    F: FnMut(&A) -> bool,
{
    let mut results = Vec::with_capacity(elements.len());
    for element in elements {
        if !predicate(element) {
            continue;
        }
        results.push(element.clone());
    }
    results
}

/// Left fold seeded with the first element.
///
/// Returns `A::default()` for an empty slice. Otherwise the first element is
/// the initial accumulator and `function(accumulator, element)` is applied to
/// the remaining elements from left to right.
///
/// Use [`fold`] when the element type has no meaningful `Default`, or when
/// the accumulator type differs from the element type.
///
/// # Examples
///
/// ```rust
/// use functools::sequence::reduce;
///
/// assert_eq!(reduce(|accumulator, number| accumulator + number, &[6, 2, 3, 4, 5]), 20);
/// assert_eq!(reduce(|accumulator, number| accumulator + number, &[4]), 4);
///
/// let empty: [i32; 0] = [];
/// assert_eq!(reduce(|accumulator, number| accumulator + number, &empty), 0);
///
/// // Left-associative: ((10 - 3) - 2)
/// assert_eq!(reduce(|accumulator, number| accumulator - number, &[10, 3, 2]), 5);
/// ```
pub fn reduce<A, F>(mut function: F, elements: &[A]) -> A
where
    A: Clone + Default,
    F: FnMut(A, &A) -> A,
{
    let Some((first, rest)) = elements.split_first() else {
        return A::default();
    };

    let mut accumulator = first.clone();
    for element in rest {
        accumulator = function(accumulator, element);
    }
    accumulator
}

/// Left fold with an explicit seed.
///
/// Returns `init` for an empty slice.
///
/// # Examples
///
/// ```rust
/// use functools::sequence::fold;
///
/// let joined = fold(
///     |accumulator: String, word: &&str| accumulator + word,
///     String::from(">"),
///     &["a", "b", "c"],
/// );
/// assert_eq!(joined, ">abc");
/// ```
pub fn fold<A, B, F>(mut function: F, init: B, elements: &[A]) -> B
where
    F: FnMut(B, &A) -> B,
{
    let mut accumulator = init;
    for element in elements {
        accumulator = function(accumulator, element);
    }
    accumulator
}
