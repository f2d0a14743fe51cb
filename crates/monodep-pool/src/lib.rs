//! Bounded fan-out over a fixed-size set of worker threads.
//!
//! One explicit task queue (an `mpsc` channel pre-loaded with indexed jobs)
//! drained by at most `workers` scoped threads. Results are reassembled by
//! submission index, so callers see output order independent of completion
//! order. The first job error cancels all jobs still in the queue.

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, mpsc};

/// Apply `f` to every item with at most `workers` invocations in flight.
///
/// `results[i]` corresponds to `items[i]`. On failure the error of the
/// lowest-index failed job is returned; jobs dequeued after a failure are
/// skipped without running.
pub fn bounded_map<T, R, F>(items: Vec<T>, workers: usize, f: F) -> anyhow::Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(usize, T) -> anyhow::Result<R> + Sync,
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    let worker_count = workers.clamp(1, total);

    let (job_tx, job_rx) = mpsc::channel();
    for job in items.into_iter().enumerate() {
        job_tx.send(job).expect("job queue receiver is alive");
    }
    drop(job_tx);

    let queue = Mutex::new(job_rx);
    let cancelled = AtomicBool::new(false);
    let (result_tx, result_rx) = mpsc::channel();

    let mut collected: Vec<(usize, anyhow::Result<R>)> = std::thread::scope(|scope| {
        let queue = &queue;
        let cancelled = &cancelled;
        let f = &f;
        for _ in 0..worker_count {
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                loop {
                    // Hold the queue lock only for the dequeue itself.
                    let job = {
                        let rx = queue.lock().unwrap_or_else(PoisonError::into_inner);
                        rx.recv()
                    };
                    let Ok((index, item)) = job else { break };
                    if cancelled.load(Ordering::Relaxed) {
                        continue;
                    }
                    let result = f(index, item);
                    if result.is_err() {
                        cancelled.store(true, Ordering::Relaxed);
                    }
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);
        result_rx.into_iter().collect()
    });

    collected.sort_unstable_by_key(|(index, _)| *index);

    let mut results = Vec::with_capacity(total);
    for (_, result) in collected {
        results.push(result?);
    }
    // A shorter result list without an error would mean a worker died
    // silently; scoped threads make that unreachable, but fail loudly.
    if results.len() != total {
        anyhow::bail!("worker pool lost {} result(s)", total - results.len());
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn empty_input_yields_empty_output() {
        let results = bounded_map(Vec::<u32>::new(), 4, |_, n| Ok(n)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn results_follow_submission_order() {
        let items: Vec<usize> = (0..64).collect();
        let results = bounded_map(items, 8, |index, n| {
            assert_eq!(index, n);
            // Finish in roughly reverse order to exercise reassembly.
            std::thread::sleep(Duration::from_micros((64 - n as u64) * 50));
            Ok(n * 2)
        })
        .unwrap();
        let expected: Vec<usize> = (0..64).map(|n| n * 2).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn concurrency_never_exceeds_the_bound() {
        let in_flight = AtomicUsize::new(0);
        let high_water = AtomicUsize::new(0);

        bounded_map((0..16).collect::<Vec<u32>>(), 3, |_, n| {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(10));
            in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(n)
        })
        .unwrap();

        let peak = high_water.load(Ordering::SeqCst);
        assert!(peak >= 1 && peak <= 3, "peak concurrency was {peak}");
    }

    #[test]
    fn worker_bound_larger_than_input_is_fine() {
        let results = bounded_map(vec![1, 2], 64, |_, n| Ok(n + 1)).unwrap();
        assert_eq!(results, vec![2, 3]);
    }

    #[test]
    fn first_error_wins_and_later_jobs_are_skipped() {
        let ran = AtomicUsize::new(0);
        let err = bounded_map((0..8).collect::<Vec<u32>>(), 1, |index, _| {
            ran.fetch_add(1, Ordering::SeqCst);
            if index == 3 {
                anyhow::bail!("job {index} exploded");
            }
            Ok(())
        })
        .unwrap_err();

        assert!(err.to_string().contains("job 3 exploded"));
        // Single worker drains the queue in order: 0..=3 ran, the rest were
        // dequeued after cancellation and skipped.
        assert_eq!(ran.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn error_under_parallelism_still_reports_a_job_error() {
        let err = bounded_map((0..32).collect::<Vec<u32>>(), 4, |index, _| {
            if index % 2 == 1 {
                anyhow::bail!("odd job {index}");
            }
            Ok(())
        })
        .unwrap_err();
        assert!(err.to_string().contains("odd job"));
    }
}
