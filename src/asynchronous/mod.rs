//! The concurrent and streaming operations for code running inside a tokio
//! runtime.
//!
//! This module mirrors [`parallel`](crate::parallel) and
//! [`stream`](crate::stream) with tokio tasks in place of rayon jobs and
//! `tokio::sync::mpsc` in place of blocking channels. Closing and failure
//! rules are the same: a stream closes exactly once, after its last producer
//! is done, and a panicking task is reported only after every sibling has
//! finished.
//!
//! - [`channel`]: create an [`AsyncSink`]/[`AsyncStream`] pair
//! - [`buffer_channel`] / [`unbuffer_channel`]: sequence ⇄ stream
//! - [`map_async`] / [`map_async_catch_unwind`]: ordered concurrent map
//! - [`map_chan`]: unordered concurrent map into a stream
//! - [`map_lazy`]: one-to-one streaming map on a single task
//!
//! # Examples
//!
//! ```rust
//! use functools::asynchronous::{buffer_channel, map_async, map_lazy, unbuffer_channel};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let lengths = map_async(|word: String| async move { word.len() }, vec![
//!     String::from("map"),
//!     String::from("filter"),
//! ])
//! .await;
//! assert_eq!(lengths, vec![3, 6]);
//!
//! let halves = map_lazy(|number: u32| number / 2, buffer_channel(&[10, 20]));
//! assert_eq!(unbuffer_channel(halves).await, vec![5, 10]);
//! # });
//! ```

mod adapter;
mod channel;
mod map;

pub use adapter::{buffer_channel, unbuffer_channel};
pub use channel::{AsyncSink, AsyncStream, channel};
pub use map::{map_async, map_async_catch_unwind, map_chan, map_lazy};
