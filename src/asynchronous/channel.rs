//! The `AsyncSink`/`AsyncStream` channel pair over `tokio::sync::mpsc`.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};

use crate::error::{FailureSlot, SendError, TaskError};

/// Creates a bounded async stream.
///
/// tokio channels cannot be unbuffered, so a `capacity` of zero is promoted
/// to one: each `send` then waits until the previous value has been taken.
///
/// # Examples
///
/// ```rust
/// use functools::asynchronous::channel;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (sink, mut stream) = channel(2);
/// sink.send(1).await.unwrap();
/// sink.close();
///
/// assert_eq!(stream.recv().await, Some(1));
/// assert_eq!(stream.recv().await, None);
/// # });
/// ```
#[must_use]
pub fn channel<A>(capacity: usize) -> (AsyncSink<A>, AsyncStream<A>) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    let failure = Arc::new(FailureSlot::default());
    (
        AsyncSink {
            sender,
            failure: Arc::clone(&failure),
        },
        AsyncStream { receiver, failure },
    )
}

// =============================================================================
// AsyncSink
// =============================================================================

/// The producing half of an async stream.
///
/// The stream closes when the last `AsyncSink` is dropped or closed.
pub struct AsyncSink<A> {
    sender: Sender<A>,
    failure: Arc<FailureSlot>,
}

impl<A> AsyncSink<A> {
    /// Sends a value, waiting for room if the stream is full.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] carrying the value back if the [`AsyncStream`]
    /// has been dropped.
    pub async fn send(&self, value: A) -> Result<(), SendError<A>> {
        self.sender
            .send(value)
            .await
            .map_err(|error| SendError(error.0))
    }

    /// Sends a value only if that can be done without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] carrying the value back if the stream is full or
    /// its receiver has been dropped.
    pub fn try_send(&self, value: A) -> Result<(), SendError<A>> {
        self.sender.try_send(value).map_err(|error| match error {
            TrySendError::Full(value) | TrySendError::Closed(value) => SendError(value),
        })
    }

    /// Closes this sink.
    pub fn close(self) {
        drop(self);
    }

    pub(crate) fn fail(&self, error: TaskError) {
        self.failure.record(error);
    }
}

impl<A> Clone for AsyncSink<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            failure: Arc::clone(&self.failure),
        }
    }
}

impl<A> fmt::Debug for AsyncSink<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AsyncSink")
            .field("capacity", &self.sender.max_capacity())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// AsyncStream
// =============================================================================

/// The receiving half of an async stream.
///
/// Also usable as a [`futures::Stream`]. A producer panic recorded on the
/// stream is re-raised when the stream closes, by both [`AsyncStream::recv`]
/// and the `futures::Stream` implementation; [`AsyncStream::try_next`]
/// returns it as an error instead.
pub struct AsyncStream<A> {
    receiver: Receiver<A>,
    failure: Arc<FailureSlot>,
}

impl<A> AsyncStream<A> {
    /// Waits for the next value, or returns `None` once the stream is closed
    /// and drained.
    ///
    /// # Panics
    ///
    /// Re-raises the panic of a producer task when the stream closes after
    /// that task failed.
    pub async fn recv(&mut self) -> Option<A> {
        match self.try_next().await {
            Ok(value) => value,
            Err(error) => error.resume(),
        }
    }

    /// Waits for the next value or for the stream to close.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`TaskError`] when the stream closed after a
    /// producer task failed. The error is reported once.
    pub async fn try_next(&mut self) -> Result<Option<A>, TaskError> {
        match self.receiver.recv().await {
            Some(value) => Ok(Some(value)),
            None => self.closed(),
        }
    }

    /// Returns the number of values currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is currently buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    fn closed(&self) -> Result<Option<A>, TaskError> {
        tracing::trace!("async stream closed");
        self.failure.take().map_or(Ok(None), Err)
    }
}

impl<A> futures::Stream for AsyncStream<A> {
    type Item = A;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<A>> {
        let this = self.get_mut();
        match this.receiver.poll_recv(context) {
            Poll::Ready(Some(value)) => Poll::Ready(Some(value)),
            Poll::Ready(None) => match this.closed() {
                Ok(_) => Poll::Ready(None),
                Err(error) => error.resume(),
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<A> fmt::Debug for AsyncStream<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AsyncStream")
            .field("len", &self.receiver.len())
            .field("failure", &self.failure)
            .finish()
    }
}
