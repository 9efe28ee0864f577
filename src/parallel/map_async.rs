//! Ordered parallel map.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use rayon::ThreadPool;
use rayon::prelude::*;

use crate::error::TaskError;

/// Maps every element on the rayon thread pool and returns the results in
/// input order.
///
/// Each element is an independent task. The call blocks until all of them
/// have finished; `result[i]` always corresponds to `elements[i]` whatever
/// order the tasks complete in.
///
/// # Panics
///
/// If `function` panics for some elements, the remaining tasks still run to
/// completion, then the panic of the lowest failing index is re-raised on the
/// calling thread with its original payload. Use [`map_async_catch_unwind`]
/// to receive it as an error instead.
///
/// # Examples
///
/// ```rust
/// use functools::parallel::map_async;
///
/// let doubled = map_async(|number| number * 2, &[1, 2, 3, 4, 5]);
/// assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
/// ```
pub fn map_async<A, B, F>(function: F, elements: &[A]) -> Vec<B>
where
    A: Sync,
    B: Send,
    F: Fn(&A) -> B + Sync,
{
    match map_async_catch_unwind(function, elements) {
        Ok(results) => results,
        Err(error) => error.resume(),
    }
}

/// Like [`map_async`], but runs on `pool` instead of the global pool.
///
/// The pool decides how many elements are mapped at the same time.
///
/// # Panics
///
/// Re-raises a task panic as [`map_async`] does.
///
/// # Examples
///
/// ```rust
/// use functools::parallel::map_async_in;
///
/// let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
/// assert_eq!(map_async_in(&pool, |number| number + 1, &[1, 2, 3]), vec![2, 3, 4]);
/// ```
pub fn map_async_in<A, B, F>(pool: &ThreadPool, function: F, elements: &[A]) -> Vec<B>
where
    A: Sync,
    B: Send,
    F: Fn(&A) -> B + Sync + Send,
{
    pool.install(|| map_async(function, elements))
}

/// Like [`map_async`], but returns a panic as a [`TaskError`].
///
/// # Errors
///
/// Returns [`TaskError::Panicked`] for the lowest index whose task panicked,
/// after every task has finished.
///
/// # Examples
///
/// ```rust
/// use functools::parallel::map_async_catch_unwind;
///
/// let result = map_async_catch_unwind(
///     |number: &i32| {
///         assert!(*number != 2, "two");
///         *number
///     },
///     &[1, 2, 3],
/// );
/// assert_eq!(result.unwrap_err().index(), 1);
/// ```
pub fn map_async_catch_unwind<A, B, F>(function: F, elements: &[A]) -> Result<Vec<B>, TaskError>
where
    A: Sync,
    B: Send,
    F: Fn(&A) -> B + Sync,
{
    tracing::trace!(tasks = elements.len(), "map_async fan-out");

    let outcomes: Vec<thread::Result<B>> = elements
        .par_iter()
        .map(|element| catch_unwind(AssertUnwindSafe(|| function(element))))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(payload) => return Err(TaskError::panicked(index, payload)),
        }
    }
    Ok(results)
}

/// Maps every element in parallel with a fallible function.
///
/// All tasks run to completion before the outcome is decided.
///
/// # Errors
///
/// Returns the error of the lowest index whose task failed.
///
/// # Panics
///
/// Re-raises a task panic as [`map_async`] does.
///
/// # Examples
///
/// ```rust
/// use functools::parallel::try_map_async;
///
/// let parsed: Result<Vec<i32>, _> = try_map_async(|text: &&str| text.parse::<i32>(), &["1", "2"]);
/// assert_eq!(parsed, Ok(vec![1, 2]));
///
/// let failed: Result<Vec<i32>, _> = try_map_async(|text: &&str| text.parse::<i32>(), &["1", "x"]);
/// assert!(failed.is_err());
/// ```
pub fn try_map_async<A, B, E, F>(function: F, elements: &[A]) -> Result<Vec<B>, E>
where
    A: Sync,
    B: Send,
    E: Send,
    F: Fn(&A) -> Result<B, E> + Sync,
{
    map_async(function, elements).into_iter().collect()
}
