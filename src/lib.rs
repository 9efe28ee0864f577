//! # functools
//!
//! Higher-order operations over homogeneous sequences, with parallel,
//! streaming and async variants.
//!
//! ## Overview
//!
//! Every function is an independent, stateless operation:
//!
//! - **Sequential transforms**: [`map`](sequence::map), [`filter`](sequence::filter),
//!   [`reduce`](sequence::reduce), [`fold`](sequence::fold), [`find_first`](sequence::find_first)
//! - **Parallel transforms**: `map_async` (ordered) and `map_chan` (unordered,
//!   streamed) on the rayon thread pool
//! - **Streams**: a `Sink`/`Stream` channel pair with an explicit closed state,
//!   `buffer_channel`, `unbuffer_channel` and the lazy `map_lazy`
//! - **Async**: the same concurrent and streaming operations on tokio tasks
//!
//! No operation mutates its input. Every stream closes exactly once, on the
//! producer side.
//!
//! ## Feature Flags
//!
//! - `stream`: blocking streams (crossbeam channels)
//! - `parallel`: rayon-backed parallel maps (implies `stream`)
//! - `async`: tokio-backed streams and concurrent maps
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use functools::prelude::*;
//!
//! let numbers: Vec<i32> = (1..=10).collect();
//! let evens = filter(|number| number % 2 == 0, &numbers);
//! let squares = map(|number| number * number, &evens);
//! assert_eq!(reduce(|accumulator, number| accumulator + number, &squares), 220);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the sequential, streaming and parallel functions together with
/// the error types. The async operations share their names with the blocking
/// ones, so only their stream types are re-exported here.
///
/// # Usage
///
/// ```rust
/// use functools::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{SendError, TaskError};
    pub use crate::sequence::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::{
        Sink, Stream, TryRecv, buffer_channel, channel, map_lazy, unbounded, unbuffer_channel,
    };

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{
        map_async, map_async_catch_unwind, map_async_in, map_chan, map_chan_in, try_map_async,
    };

    #[cfg(feature = "async")]
    pub use crate::asynchronous::{AsyncSink, AsyncStream};
}

pub mod error;
pub mod sequence;

#[cfg(feature = "stream")]
pub mod stream;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "async")]
pub mod asynchronous;
