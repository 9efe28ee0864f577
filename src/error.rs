//! Error types shared by the concurrent and streaming operations.
//!
//! Sequential functions in [`sequence`](crate::sequence) have no error type:
//! a panic in a user closure unwinds straight through them. The concurrent
//! variants run closures on other threads or tasks, so a panic there is
//! caught, kept as a [`TaskError`], and handed back to the caller once every
//! sibling task has finished.
//!
//! # Examples
//!
//! ```rust
//! use functools::error::TaskError;
//!
//! let error = TaskError::cancelled(3);
//! assert_eq!(error.index(), 3);
//! assert_eq!(error.to_string(), "task 3 was cancelled before completion");
//! ```

use std::any::Any;
use std::fmt;

use thiserror::Error;

// =============================================================================
// TaskError
// =============================================================================

/// The failure of one task spawned by a concurrent operation.
///
/// `index` is the position of the element the task was working on in the
/// input sequence.
#[derive(Error)]
pub enum TaskError {
    /// The user-supplied function panicked.
    #[error("task {index} panicked: {message}")]
    Panicked {
        /// Position of the failing element.
        index: usize,
        /// The panic message, when the payload was a string.
        message: String,
        /// The original panic payload.
        payload: Box<dyn Any + Send + 'static>,
    },

    /// The task was dropped by its runtime before it finished.
    #[error("task {index} was cancelled before completion")]
    Cancelled {
        /// Position of the element whose task was cancelled.
        index: usize,
    },
}

impl TaskError {
    /// Builds a [`TaskError::Panicked`] from a payload caught by `catch_unwind`.
    #[must_use]
    pub fn panicked(index: usize, payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = panic_message(payload.as_ref());
        Self::Panicked {
            index,
            message,
            payload,
        }
    }

    /// Builds a [`TaskError::Cancelled`].
    #[must_use]
    pub const fn cancelled(index: usize) -> Self {
        Self::Cancelled { index }
    }

    /// Returns the position of the element whose task failed.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Panicked { index, .. } | Self::Cancelled { index } => *index,
        }
    }

    /// Returns the panic message, or `None` for a cancelled task.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Panicked { message, .. } => Some(message),
            Self::Cancelled { .. } => None,
        }
    }

    /// Returns `true` if the task panicked.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }

    /// Converts the error into a payload suitable for
    /// [`std::panic::resume_unwind`].
    ///
    /// A panicked task yields its original payload, so a re-raised panic
    /// carries the exact message the user function panicked with.
    #[must_use]
    pub fn into_panic(self) -> Box<dyn Any + Send + 'static> {
        match self {
            Self::Panicked { payload, .. } => payload,
            cancelled @ Self::Cancelled { .. } => Box::new(cancelled.to_string()),
        }
    }

    /// Re-raises the failure on the current thread.
    pub fn resume(self) -> ! {
        std::panic::resume_unwind(self.into_panic())
    }
}

impl fmt::Debug for TaskError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panicked { index, message, .. } => formatter
                .debug_struct("Panicked")
                .field("index", index)
                .field("message", message)
                .finish_non_exhaustive(),
            Self::Cancelled { index } => formatter
                .debug_struct("Cancelled")
                .field("index", index)
                .finish(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

// =============================================================================
// SendError
// =============================================================================

/// Returned when sending into a stream whose receiving half is gone.
///
/// The rejected value is handed back so the caller can reuse it.
#[derive(Error, Clone, Copy, PartialEq, Eq)]
#[error("sending on a closed stream")]
pub struct SendError<A>(pub A);

impl<A> SendError<A> {
    /// Returns the value that could not be sent.
    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<A> fmt::Debug for SendError<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SendError").finish_non_exhaustive()
    }
}

// =============================================================================
// FailureSlot
// =============================================================================

/// First-failure-wins storage shared between the producers of a stream and
/// its consumer.
///
/// Producers record before releasing their sink, so the consumer always sees
/// the failure once it observes the stream closed.
#[cfg(any(feature = "stream", feature = "async"))]
#[derive(Default)]
pub(crate) struct FailureSlot {
    failure: parking_lot::Mutex<Option<TaskError>>,
}

#[cfg(any(feature = "stream", feature = "async"))]
impl FailureSlot {
    pub(crate) fn record(&self, error: TaskError) {
        let mut failure = self.failure.lock();
        if failure.is_some() {
            tracing::warn!(%error, "dropping task failure, an earlier one is already recorded");
            return;
        }
        tracing::warn!(%error, "task failure recorded on stream");
        *failure = Some(error);
    }

    pub(crate) fn take(&self) -> Option<TaskError> {
        self.failure.lock().take()
    }
}

#[cfg(any(feature = "stream", feature = "async"))]
impl fmt::Debug for FailureSlot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FailureSlot")
            .field("failed", &self.failure.lock().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[rstest]
    #[case(Box::new("static message") as Box<dyn Any + Send>, "static message")]
    #[case(Box::new(String::from("owned message")) as Box<dyn Any + Send>, "owned message")]
    #[case(Box::new(42_i32) as Box<dyn Any + Send>, "Box<dyn Any>")]
    fn panicked_extracts_message(
        #[case] payload: Box<dyn Any + Send>,
        #[case] expected: &str,
    ) {
        let error = TaskError::panicked(7, payload);
        assert_eq!(error.index(), 7);
        assert_eq!(error.message(), Some(expected));
        assert!(error.is_panic());
    }

    #[rstest]
    fn task_error_display() {
        let panicked = TaskError::panicked(2, Box::new("boom"));
        assert_eq!(panicked.to_string(), "task 2 panicked: boom");

        let cancelled = TaskError::cancelled(5);
        assert_eq!(
            cancelled.to_string(),
            "task 5 was cancelled before completion"
        );
        assert_eq!(cancelled.message(), None);
        assert!(!cancelled.is_panic());
    }

    #[rstest]
    fn task_error_debug_hides_payload() {
        let debug = format!("{:?}", TaskError::panicked(1, Box::new("boom")));
        assert!(debug.contains("Panicked"));
        assert!(debug.contains("index: 1"));
        assert!(debug.contains("boom"));
    }

    #[rstest]
    fn into_panic_returns_original_payload() {
        let payload = TaskError::panicked(0, Box::new(String::from("original"))).into_panic();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("original"));
    }

    #[rstest]
    fn resume_reraises_with_original_payload() {
        let result: std::thread::Result<()> = catch_unwind(AssertUnwindSafe(|| {
            TaskError::panicked(0, Box::new("reraised")).resume();
        }));
        let payload = result.expect_err("resume must unwind");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"reraised"));
    }

    #[rstest]
    fn send_error_returns_value() {
        let error = SendError(String::from("value"));
        assert_eq!(error.to_string(), "sending on a closed stream");
        assert_eq!(format!("{error:?}"), "SendError { .. }");
        assert_eq!(error.into_inner(), "value");
    }

    #[cfg(any(feature = "stream", feature = "async"))]
    #[rstest]
    fn failure_slot_keeps_first_failure() {
        let slot = FailureSlot::default();
        slot.record(TaskError::panicked(3, Box::new("first")));
        slot.record(TaskError::panicked(1, Box::new("second")));

        let failure = slot.take().expect("a failure was recorded");
        assert_eq!(failure.index(), 3);
        assert_eq!(failure.message(), Some("first"));
        assert!(slot.take().is_none());
    }
}
