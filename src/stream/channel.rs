//! The `Sink`/`Stream` channel pair.

use std::fmt;
use std::sync::Arc;
#[cfg(feature = "parallel")]
use std::time::Duration;

use crossbeam::channel::{self as crossbeam_channel, Receiver, Sender, TryRecvError, TrySendError};
#[cfg(feature = "parallel")]
use crossbeam::channel::RecvTimeoutError;
#[cfg(feature = "parallel")]
use crossbeam::utils::Backoff;

use crate::error::{FailureSlot, SendError, TaskError};

/// How long an idle rayon worker blocks before checking for jobs again.
#[cfg(feature = "parallel")]
const WORKER_IDLE_WAIT: Duration = Duration::from_millis(1);

// =============================================================================
// Constructors
// =============================================================================

/// Creates a bounded stream.
///
/// A `capacity` of zero creates an unbuffered stream: every `send` waits
/// until a receiver takes the value.
///
/// # Examples
///
/// ```rust
/// use functools::stream::channel;
///
/// let (sink, stream) = channel(2);
/// sink.send(1).unwrap();
/// sink.send(2).unwrap();
/// sink.close();
///
/// assert_eq!(stream.recv(), Some(1));
/// assert_eq!(stream.recv(), Some(2));
/// assert_eq!(stream.recv(), None);
/// ```
#[must_use]
pub fn channel<A>(capacity: usize) -> (Sink<A>, Stream<A>) {
    let (sender, receiver) = crossbeam_channel::bounded(capacity);
    pair(sender, receiver)
}

/// Creates a stream with no capacity limit.
#[must_use]
pub fn unbounded<A>() -> (Sink<A>, Stream<A>) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    pair(sender, receiver)
}

fn pair<A>(sender: Sender<A>, receiver: Receiver<A>) -> (Sink<A>, Stream<A>) {
    let failure = Arc::new(FailureSlot::default());
    (
        Sink {
            sender,
            failure: Arc::clone(&failure),
        },
        Stream { receiver, failure },
    )
}

// =============================================================================
// Sink
// =============================================================================

/// The producing half of a stream.
///
/// The stream closes when the last `Sink` is dropped or closed. Since
/// [`Sink::close`] consumes the sink, nothing can be written after closing.
pub struct Sink<A> {
    sender: Sender<A>,
    failure: Arc<FailureSlot>,
}

impl<A> Sink<A> {
    /// Sends a value, waiting for room if the stream is full.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] carrying the value back if the [`Stream`] has
    /// been dropped.
    pub fn send(&self, value: A) -> Result<(), SendError<A>> {
        self.sender
            .send(value)
            .map_err(|error| SendError(error.into_inner()))
    }

    /// Sends a value only if that can be done without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] carrying the value back if the stream is full or
    /// its receiver has been dropped.
    pub fn try_send(&self, value: A) -> Result<(), SendError<A>> {
        self.sender.try_send(value).map_err(|error| match error {
            TrySendError::Full(value) | TrySendError::Disconnected(value) => SendError(value),
        })
    }

    /// Closes this sink.
    ///
    /// The stream is observed closed once every clone of the sink is gone.
    pub fn close(self) {
        drop(self);
    }

    /// Records a task failure to be surfaced when the stream closes.
    pub(crate) fn fail(&self, error: TaskError) {
        self.failure.record(error);
    }
}

impl<A> Clone for Sink<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            failure: Arc::clone(&self.failure),
        }
    }
}

impl<A> fmt::Debug for Sink<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Sink")
            .field("len", &self.sender.len())
            .field("capacity", &self.sender.capacity())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Stream
// =============================================================================

/// Outcome of a non-blocking [`Stream::try_recv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryRecv<A> {
    /// A value was available.
    Item(A),
    /// The stream is open but currently has nothing buffered.
    Empty,
    /// The stream is closed and drained.
    Closed,
}

/// The receiving half of a stream.
///
/// Values arrive in the order they were sent. Once every [`Sink`] is gone
/// and the buffer is drained, the stream reports closed.
///
/// If a producer task panicked, the panic is held back until the stream
/// closes: [`Stream::recv`] then re-raises it instead of returning `None`,
/// and [`Stream::try_next`] returns it as an error.
pub struct Stream<A> {
    receiver: Receiver<A>,
    failure: Arc<FailureSlot>,
}

impl<A> Stream<A> {
    /// Blocks until a value arrives, or returns `None` once the stream is
    /// closed and drained.
    ///
    /// # Panics
    ///
    /// Re-raises the panic of a producer task when the stream closes after
    /// that task failed.
    pub fn recv(&self) -> Option<A> {
        match self.try_next() {
            Ok(value) => value,
            Err(error) => error.resume(),
        }
    }

    /// Blocks until a value arrives or the stream closes.
    ///
    /// Returns `Ok(None)` when the stream closed cleanly. Called from a rayon
    /// worker, it keeps running that pool's pending jobs while it waits, so
    /// draining a `map_chan` stream inside a parallel task cannot starve
    /// the tasks that feed it.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`TaskError`] when the stream closed after a
    /// producer task failed. The error is reported once; later calls return
    /// `Ok(None)`.
    pub fn try_next(&self) -> Result<Option<A>, TaskError> {
        #[cfg(feature = "parallel")]
        if rayon::current_thread_index().is_some() {
            return self.try_next_on_worker();
        }

        match self.receiver.recv() {
            Ok(value) => Ok(Some(value)),
            Err(_) => self.closed(),
        }
    }

    /// Waits on a rayon worker without blocking it: the producers may be
    /// jobs queued on this very worker, so pending jobs run while waiting.
    #[cfg(feature = "parallel")]
    fn try_next_on_worker(&self) -> Result<Option<A>, TaskError> {
        let backoff = Backoff::new();
        loop {
            match self.receiver.try_recv() {
                Ok(value) => return Ok(Some(value)),
                Err(TryRecvError::Disconnected) => return self.closed(),
                Err(TryRecvError::Empty) => {}
            }

            match rayon::yield_now() {
                Some(rayon::Yield::Executed) => backoff.reset(),
                _ if backoff.is_completed() => {
                    match self.receiver.recv_timeout(WORKER_IDLE_WAIT) {
                        Ok(value) => return Ok(Some(value)),
                        Err(RecvTimeoutError::Disconnected) => return self.closed(),
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                }
                _ => backoff.snooze(),
            }
        }
    }

    /// Receives a value without blocking.
    ///
    /// # Panics
    ///
    /// Re-raises a recorded producer panic, like [`Stream::recv`].
    pub fn try_recv(&self) -> TryRecv<A> {
        match self.receiver.try_recv() {
            Ok(value) => TryRecv::Item(value),
            Err(TryRecvError::Empty) => TryRecv::Empty,
            Err(TryRecvError::Disconnected) => match self.closed() {
                Ok(_) => TryRecv::Closed,
                Err(error) => error.resume(),
            },
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

    /// Returns the buffer capacity, or `None` for an unbounded stream.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.receiver.capacity()
    }

    fn closed(&self) -> Result<Option<A>, TaskError> {
        tracing::trace!("stream closed");
        self.failure.take().map_or(Ok(None), Err)
    }
}

impl<A> Iterator for Stream<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        self.recv()
    }
}

impl<A> fmt::Debug for Stream<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Stream")
            .field("len", &self.receiver.len())
            .field("capacity", &self.receiver.capacity())
            .field("failure", &self.failure)
            .finish()
    }
}
