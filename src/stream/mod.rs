//! Blocking streams and the operations built on them.
//!
//! A stream is a FIFO channel split into a producing [`Sink`] and a
//! receiving [`Stream`]. It starts open and closes exactly once, when the
//! last `Sink` is dropped or [`closed`](Sink::close). Only producers close a
//! stream, and a closed stream can never be written again because closing
//! consumes the sink.
//!
//! - [`channel`] / [`unbounded`]: create a stream (capacity 0 is unbuffered)
//! - [`buffer_channel`]: copy a slice into an already-closed stream
//! - [`unbuffer_channel`]: drain a stream into a `Vec`
//! - [`map_lazy`]: map a stream one value at a time on a worker thread
//!
//! # Examples
//!
//! ```rust
//! use functools::stream::{buffer_channel, map_lazy, unbuffer_channel};
//!
//! let squares = map_lazy(|value: u32| value * value, buffer_channel(&[1, 2, 3]));
//! assert_eq!(unbuffer_channel(squares), vec![1, 4, 9]);
//! ```

mod adapter;
mod channel;
mod lazy;

pub use adapter::{buffer_channel, unbuffer_channel};
pub use channel::{Sink, Stream, TryRecv, channel, unbounded};
pub use lazy::map_lazy;
