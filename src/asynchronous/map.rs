//! Concurrent maps on tokio tasks.

use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;

use super::channel::{AsyncSink, AsyncStream, channel};
use crate::error::TaskError;

/// Maps every element on its own tokio task and returns the results in input
/// order.
///
/// Resolves once every task has finished; `result[i]` always corresponds to
/// the `i`-th element.
///
/// # Panics
///
/// Panics if called outside a tokio runtime. If `function` or its future
/// panics, the remaining tasks still run to completion, then the panic of the
/// lowest failing index is re-raised with its original payload.
///
/// # Examples
///
/// ```rust
/// use functools::asynchronous::map_async;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let doubled = map_async(|number: i32| async move { number * 2 }, vec![1, 2, 3]).await;
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # });
/// ```
pub async fn map_async<A, B, F, Fut, I>(function: F, elements: I) -> Vec<B>
where
    I: IntoIterator<Item = A>,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = B> + Send + 'static,
{
    match map_async_catch_unwind(function, elements).await {
        Ok(results) => results,
        Err(error) => error.resume(),
    }
}

/// Like [`map_async`], but returns a task failure as a [`TaskError`].
///
/// # Errors
///
/// Returns the failure of the lowest failing index after every task has
/// finished: [`TaskError::Panicked`] for a panic, [`TaskError::Cancelled`] if
/// the runtime dropped the task.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub async fn map_async_catch_unwind<A, B, F, Fut, I>(
    function: F,
    elements: I,
) -> Result<Vec<B>, TaskError>
where
    I: IntoIterator<Item = A>,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = B> + Send + 'static,
{
    let function = Arc::new(function);
    let handles: Vec<_> = elements
        .into_iter()
        .map(|element| {
            let function = Arc::clone(&function);
            tokio::spawn(async move { function(element).await })
        })
        .collect();

    tracing::trace!(tasks = handles.len(), "async map_async fan-out");

    let outcomes = join_all(handles).await;

    let mut results = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(error) if error.is_panic() => {
                return Err(TaskError::panicked(index, error.into_panic()));
            }
            Err(_) => return Err(TaskError::cancelled(index)),
        }
    }
    Ok(results)
}

/// Maps every element on its own tokio task, streaming results as they
/// complete.
///
/// Returns immediately. Results arrive in completion order and the stream
/// closes once every task has written its result. A panicking task is
/// recorded on the stream and surfaces when the stream closes. A task that
/// is dropped before finishing, for example because its runtime shut down,
/// is recorded as [`TaskError::Cancelled`] the same way.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
///
/// # Examples
///
/// ```rust
/// use functools::asynchronous::{map_chan, unbuffer_channel};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let stream = map_chan(|number: i32| async move { number * 2 }, vec![1, 2, 3]);
/// let mut results = unbuffer_channel(stream).await;
/// results.sort_unstable();
/// assert_eq!(results, vec![2, 4, 6]);
/// # });
/// ```
pub fn map_chan<A, B, F, Fut, I>(function: F, elements: I) -> AsyncStream<B>
where
    I: IntoIterator<Item = A>,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = B> + Send + 'static,
{
    let elements: Vec<A> = elements.into_iter().collect();
    let (sink, stream) = channel(elements.len());
    let function = Arc::new(function);

    tracing::trace!(tasks = elements.len(), "async map_chan fan-out");

    for (index, element) in elements.into_iter().enumerate() {
        let function = Arc::clone(&function);
        let sink = sink.clone();
        tokio::spawn(async move {
            let mut guard = CancelGuard {
                sink: &sink,
                index,
                finished: false,
            };
            let outcome = AssertUnwindSafe(async move { function(element).await })
                .catch_unwind()
                .await;
            match outcome {
                Ok(result) => {
                    if guard.sink.send(result).await.is_err() {
                        tracing::trace!(index, "map_chan result dropped, stream receiver gone");
                    }
                }
                Err(payload) => guard.sink.fail(TaskError::panicked(index, payload)),
            }
            guard.finished = true;
        });
    }

    sink.close();
    stream
}

/// Records a cancellation if a `map_chan` task is dropped before it
/// finishes, e.g. by a runtime shutdown.
struct CancelGuard<'a, B> {
    sink: &'a AsyncSink<B>,
    index: usize,
    finished: bool,
}

impl<B> Drop for CancelGuard<'_, B> {
    fn drop(&mut self) {
        if !self.finished {
            self.sink.fail(TaskError::cancelled(self.index));
        }
    }
}

/// Why a `map_lazy` task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    InputClosed,
    ConsumerGone,
    TransformPanicked,
    UpstreamFailed,
}

/// Maps an async stream one value at a time on a single tokio task.
///
/// The output holds at most one value, so the task pulls the next input only
/// after the previous result has been taken. The output closes exactly when
/// `input` is observed closed; `map_lazy` never closes `input`.
///
/// A panic in `function`, or a failure recorded on `input`, stops the task
/// and is recorded on the output.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
///
/// # Examples
///
/// ```rust
/// use functools::asynchronous::{buffer_channel, map_lazy, unbuffer_channel};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let output = map_lazy(|number: i32| number + 1, buffer_channel(&[1, 2, 3]));
/// assert_eq!(unbuffer_channel(output).await, vec![2, 3, 4]);
/// # });
/// ```
pub fn map_lazy<A, B, F>(function: F, mut input: AsyncStream<A>) -> AsyncStream<B>
where
    A: Send + 'static,
    B: Send + 'static,
    F: FnMut(A) -> B + Send + 'static,
{
    let (sink, output) = channel(1);
    tokio::spawn(async move {
        let exit = drive(function, &mut input, &sink).await;
        tracing::debug!(?exit, "async map_lazy task finished");
    });
    output
}

async fn drive<A, B, F>(mut function: F, input: &mut AsyncStream<A>, sink: &AsyncSink<B>) -> Exit
where
    F: FnMut(A) -> B,
{
    let mut index = 0;
    loop {
        let value = match input.try_next().await {
            Ok(Some(value)) => value,
            Ok(None) => return Exit::InputClosed,
            Err(error) => {
                sink.fail(error);
                return Exit::UpstreamFailed;
            }
        };

        let result = match catch_unwind(AssertUnwindSafe(|| function(value))) {
            Ok(result) => result,
            Err(payload) => {
                sink.fail(TaskError::panicked(index, payload));
                return Exit::TransformPanicked;
            }
        };

        if sink.send(result).await.is_err() {
            return Exit::ConsumerGone;
        }
        index += 1;
    }
}
