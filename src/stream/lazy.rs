//! Lazy one-to-one streaming map.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use super::channel::{Sink, Stream, channel};
use crate::error::TaskError;

const WORKER_NAME: &str = "functools-map-lazy";

/// Why a `map_lazy` worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    InputClosed,
    ConsumerGone,
    TransformPanicked,
    UpstreamFailed,
}

/// Maps a stream lazily on a dedicated worker thread.
///
/// The worker receives from `input` one value at a time, applies `function`
/// and hands the result to the returned stream, which is unbuffered: the
/// next input value is not pulled until the previous result has been taken.
///
/// The output closes exactly when `input` is observed closed. `map_lazy`
/// never closes `input`; that stays the job of whoever holds its [`Sink`].
///
/// If `function` panics, the worker stops consuming and the output closes
/// with the panic recorded, so the consumer's [`Stream::recv`] re-raises it.
/// A failure recorded on `input` is forwarded the same way. Dropping the
/// output stream stops the worker at its next send.
///
/// # Panics
///
/// Panics if the operating system refuses to spawn the worker thread.
///
/// # Examples
///
/// ```rust
/// use functools::stream::{channel, map_lazy};
/// use std::thread;
///
/// let (sink, input) = channel(0);
/// let output = map_lazy(|value: i32| value * 10, input);
///
/// thread::spawn(move || {
///     for value in 1..=5 {
///         sink.send(value).unwrap();
///     }
///     sink.close();
/// });
///
/// assert_eq!(output.collect::<Vec<_>>(), vec![10, 20, 30, 40, 50]);
/// ```
pub fn map_lazy<A, B, F>(function: F, input: Stream<A>) -> Stream<B>
where
    A: Send + 'static,
    B: Send + 'static,
    F: FnMut(A) -> B + Send + 'static,
{
    let (sink, output) = channel(0);

    thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .spawn(move || {
            let exit = drive(function, &input, &sink);
            tracing::debug!(?exit, "map_lazy worker finished");
        })
        .expect("failed to spawn map_lazy worker thread");

    output
}

fn drive<A, B, F>(mut function: F, input: &Stream<A>, sink: &Sink<B>) -> Exit
where
    F: FnMut(A) -> B,
{
    let mut index = 0;
    loop {
        let value = match input.try_next() {
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

        if sink.send(result).is_err() {
            return Exit::ConsumerGone;
        }
        index += 1;
    }
}
