//! Sequential transforms over in-memory sequences.
//!
//! Every function here borrows its input slice, never mutates it, and runs
//! the supplied closure on the caller's thread in index order:
//!
//! - [`map`]: transform every element
//! - [`filter`]: keep the elements matching a predicate
//! - [`reduce`]: left fold seeded with the first element
//! - [`fold`]: left fold with an explicit seed
//! - [`find_first`]: first element matching a condition
//!
//! # Examples
//!
//! ```rust
//! use functools::sequence::{filter, find_first, map, reduce};
//!
//! let numbers = vec![1, 2, 3, 4, 5, 6];
//!
//! let doubled = map(|number| number * 2, &numbers);
//! assert_eq!(doubled, vec![2, 4, 6, 8, 10, 12]);
//!
//! let evens = filter(|number| number % 2 == 0, &numbers);
//! assert_eq!(evens, vec![2, 4, 6]);
//!
//! let sum = reduce(|accumulator, number| accumulator + number, &numbers);
//! assert_eq!(sum, 21);
//!
//! assert_eq!(find_first(|number| *number == 5, &numbers), Some(&5));
//! ```

mod search;
mod transform;

pub use search::find_first;
pub use transform::{filter, fold, map, reduce};
