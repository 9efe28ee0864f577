//! Unordered parallel map into a stream.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use rayon::ThreadPool;

use crate::error::TaskError;
use crate::stream::{Stream, channel};

/// A unit of work handed to a rayon spawner.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Maps every element on the rayon thread pool, streaming results as they
/// complete.
///
/// Returns immediately. Each task writes its result to the returned stream as
/// soon as it is ready, so results arrive in completion order, not input
/// order. The stream is closed exactly once, after every task has finished
/// writing; a receiver that observes the stream closed has seen every result.
///
/// The stream's capacity equals the number of elements, so tasks never wait
/// on a slow consumer.
///
/// If `function` panics for an element, the other tasks still deliver their
/// results and the panic is held until the stream closes: [`Stream::recv`]
/// re-raises it and [`Stream::try_next`] returns it as a [`TaskError`].
///
/// # Examples
///
/// ```rust
/// use functools::parallel::map_chan;
///
/// let mut results: Vec<i32> = map_chan(|number| number * 2, vec![1, 2, 3, 4, 5]).collect();
/// results.sort_unstable();
/// assert_eq!(results, vec![2, 4, 6, 8, 10]);
/// ```
pub fn map_chan<A, B, F, I>(function: F, elements: I) -> Stream<B>
where
    I: IntoIterator<Item = A>,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    spawn_all(|job| rayon::spawn(job), function, elements)
}

/// Like [`map_chan`], but spawns the tasks on `pool`.
pub fn map_chan_in<A, B, F, I>(pool: &ThreadPool, function: F, elements: I) -> Stream<B>
where
    I: IntoIterator<Item = A>,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    spawn_all(|job| pool.spawn(job), function, elements)
}

fn spawn_all<A, B, F, I, S>(mut spawn: S, function: F, elements: I) -> Stream<B>
where
    I: IntoIterator<Item = A>,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync + 'static,
    S: FnMut(Job),
{
    let elements: Vec<A> = elements.into_iter().collect();
    let (sink, stream) = channel(elements.len());
    let function = Arc::new(function);

    tracing::trace!(tasks = elements.len(), "map_chan fan-out");

    for (index, element) in elements.into_iter().enumerate() {
        let function = Arc::clone(&function);
        let sink = sink.clone();
        spawn(Box::new(move || {
            match catch_unwind(AssertUnwindSafe(|| function(element))) {
                Ok(result) => {
                    if sink.send(result).is_err() {
                        tracing::trace!(index, "map_chan result dropped, stream receiver gone");
                    }
                }
                Err(payload) => sink.fail(TaskError::panicked(index, payload)),
            }
        }));
    }

    // Each task holds its own sink; the stream closes when the last one ends.
    sink.close();
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::unbuffer_channel;
    use rstest::rstest;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[rstest]
    fn map_chan_yields_every_result() {
        let mut results = unbuffer_channel(map_chan(|x: i32| x * 2, vec![1, 2, 3, 4, 5]));
        results.sort_unstable();
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[rstest]
    fn map_chan_of_empty_is_closed() {
        let stream = map_chan(|x: i32| x, Vec::new());
        assert_eq!(stream.recv(), None);
    }

    #[rstest]
    fn map_chan_returns_before_tasks_finish() {
        let gate = Arc::new(Barrier::new(2));
        let task_gate = Arc::clone(&gate);
        let stream = map_chan(
            move |x: i32| {
                task_gate.wait();
                x
            },
            vec![1],
        );

        // The task cannot finish until this thread reaches the barrier.
        assert!(stream.is_empty());
        gate.wait();
        assert_eq!(stream.recv(), Some(1));
        assert_eq!(stream.recv(), None);
    }

    #[rstest]
    fn map_chan_delivers_in_completion_order() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let stream = map_chan_in(
            &pool,
            |millis: u64| {
                thread::sleep(Duration::from_millis(millis));
                millis
            },
            vec![120, 0],
        );
        assert_eq!(stream.recv(), Some(0));
        assert_eq!(stream.recv(), Some(120));
        assert_eq!(stream.recv(), None);
    }

    #[rstest]
    fn map_chan_surfaces_panic_after_successes() {
        let stream = map_chan(
            |x: i32| {
                assert!(x != 2, "two failed");
                x
            },
            vec![1, 2, 3],
        );

        let mut delivered = Vec::new();
        let error = loop {
            match stream.try_next() {
                Ok(Some(value)) => delivered.push(value),
                Ok(None) => panic!("stream closed without reporting the failure"),
                Err(error) => break error,
            }
        };

        delivered.sort_unstable();
        assert_eq!(delivered, vec![1, 3]);
        assert_eq!(error.index(), 1);
        assert_eq!(error.message(), Some("two failed"));
    }

    #[rstest]
    fn map_chan_in_uses_given_pool() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .thread_name(|_| String::from("single-worker"))
            .build()
            .unwrap();

        let names = unbuffer_channel(map_chan_in(
            &pool,
            |_: i32| thread::current().name().map(str::to_string),
            vec![1, 2, 3],
        ));
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|name| name.as_deref() == Some("single-worker")));
    }
}
