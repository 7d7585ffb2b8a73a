//! Process-wide upstream request scheduler.
//!
//! Every upstream call in the process goes through one `RateLimiter`,
//! which admits at most one call at a time and keeps consecutive call
//! starts at least `min_interval` apart. Admission is first-come
//! first-served; callers suspend until their task has run.

use std::future::Future;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

pub struct RateLimiter {
    min_interval: Duration,
    // Fair mutex: queued callers are admitted in FIFO order, and holding
    // the guard across the task keeps at most one task in flight.
    last_start: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_start: Mutex::new(None),
        }
    }

    /// Run `task` once the limiter admits it, suspending the caller
    /// until the task resolves. There is no timeout and no cancellation:
    /// a submitted task always runs to completion.
    pub async fn schedule<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        let mut last_start = self.last_start.lock().await;
        if let Some(previous) = *last_start {
            sleep_until(previous + self.min_interval).await;
        }
        *last_start = Some(Instant::now());
        task.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn consecutive_starts_are_spaced() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(50)));
        let starts = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            let starts = Arc::clone(&starts);
            handles.push(tokio::spawn(async move {
                limiter
                    .schedule(async {
                        starts.lock().await.push(Instant::now());
                    })
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let starts = starts.lock().await;
        assert_eq!(starts.len(), 4);
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(50));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn never_two_tasks_in_flight() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(10)));
        let in_flight = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = Arc::clone(&limiter);
            let in_flight = Arc::clone(&in_flight);
            handles.push(tokio::spawn(async move {
                limiter
                    .schedule(async {
                        assert!(!in_flight.swap(true, Ordering::SeqCst));
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        in_flight.store(false, Ordering::SeqCst);
                    })
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tasks_run_in_submission_order() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(10)));
        let order = Arc::new(Mutex::new(Vec::new()));
        let submitted = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for i in 0..5 {
            let limiter = Arc::clone(&limiter);
            let order = Arc::clone(&order);
            let submitted = Arc::clone(&submitted);
            handles.push(tokio::spawn(async move {
                // Spin-wait on the counter so tasks enter the queue in
                // index order before any of them is admitted.
                while submitted.load(Ordering::SeqCst) != i {
                    tokio::task::yield_now().await;
                }
                let scheduled = limiter.schedule(async move {
                    order.lock().await.push(i);
                });
                submitted.fetch_add(1, Ordering::SeqCst);
                scheduled.await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().await, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_returned_to_the_caller() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let out = limiter.schedule(async { 21 * 2 }).await;
        assert_eq!(out, 42);
    }
}
