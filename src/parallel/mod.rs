//! Parallel transforms on the rayon thread pool.
//!
//! Every element becomes its own task, and the pool's thread count bounds
//! how many of them run at once. All functions in this module follow one
//! failure policy: a panicking task never stops its siblings, and the panic is
//! handed to the caller only once every task has finished.
//!
//! - [`map_async`]: ordered parallel map, blocks until done
//! - [`map_async_catch_unwind`]: same, panics returned as [`TaskError`](crate::error::TaskError)
//! - [`try_map_async`]: ordered parallel map with a fallible function
//! - [`map_chan`]: unordered parallel map into a [`Stream`](crate::stream::Stream)
//!
//! The `_in` variants take an explicit [`rayon::ThreadPool`].
//!
//! # Examples
//!
//! ```rust
//! use functools::parallel::{map_async, map_chan};
//!
//! let input: Vec<u64> = (1..=1_000).collect();
//! let squares = map_async(|number| number * number, &input);
//! assert_eq!(squares[9], 100);
//!
//! let total: u64 = map_chan(|number| number * number, input).sum();
//! assert_eq!(total, squares.iter().sum::<u64>());
//! ```

mod map_async;
mod map_chan;

pub use map_async::{map_async, map_async_catch_unwind, map_async_in, try_map_async};
pub use map_chan::{map_chan, map_chan_in};
