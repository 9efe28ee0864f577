//! Conversions between sequences and async streams.

use super::channel::{AsyncStream, channel};

/// Copies `elements` into a new async stream that is already closed.
///
/// Filling the stream never waits and needs no runtime.
///
/// # Examples
///
/// ```rust
/// use functools::asynchronous::{buffer_channel, unbuffer_channel};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let stream = buffer_channel(&["a", "b"]);
/// assert_eq!(unbuffer_channel(stream).await, vec!["a", "b"]);
/// # });
/// ```
#[must_use]
pub fn buffer_channel<A>(elements: &[A]) -> AsyncStream<A>
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

/// Drains an async stream into a `Vec`, waiting until the stream closes.
///
/// # Panics
///
/// Re-raises a recorded producer panic once the stream closes.
pub async fn unbuffer_channel<A>(mut stream: AsyncStream<A>) -> Vec<A> {
    let mut results = Vec::with_capacity(stream.len());
    while let Some(value) = stream.recv().await {
        results.push(value);
    }
    results
}
