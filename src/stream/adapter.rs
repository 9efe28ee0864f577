//! Conversions between sequences and streams.

use super::channel::{Stream, channel};

/// Copies `elements` into a new stream that is already closed.
///
/// The stream's capacity equals `elements.len()`, so filling it never
/// blocks. Receivers drain the values in order and then observe the stream
/// closed.
///
/// # Examples
///
/// ```rust
/// use functools::stream::buffer_channel;
///
/// let stream = buffer_channel(&[1, 2, 3]);
/// assert_eq!(stream.recv(), Some(1));
/// assert_eq!(stream.recv(), Some(2));
/// assert_eq!(stream.recv(), Some(3));
/// assert_eq!(stream.recv(), None);
/// ```
#[must_use]
pub fn buffer_channel<A>(elements: &[A]) -> Stream<A>
where
    A: Clone,
{
    let (sink, stream) = channel(elements.len());
    for element in elements {
        sink.try_send(element.clone())
            .expect("capacity matches the element count and the receiver is held");
    }
    sink.close();
    stream
}

/// Drains a stream into a `Vec`, blocking until the stream closes.
///
/// Values are collected in arrival order. There is no timeout: if the
/// producer never closes the stream this never returns.
///
/// # Panics
///
/// Re-raises a recorded producer panic once the stream closes, as
/// [`Stream::recv`] does.
///
/// # Examples
///
/// ```rust
/// use functools::stream::{channel, unbuffer_channel};
/// use std::thread;
///
/// let (sink, stream) = channel(0);
/// thread::spawn(move || {
///     for value in 1..=6 {
///         sink.send(value).unwrap();
///     }
/// });
///
/// assert_eq!(unbuffer_channel(stream), vec![1, 2, 3, 4, 5, 6]);
/// ```
pub fn unbuffer_channel<A>(stream: Stream<A>) -> Vec<A> {
    let mut results = Vec::with_capacity(stream.len());
    while let Some(value) = stream.recv() {
        results.push(value);
    }
    results
}
