//! Generic bounded queue worker pool (C7).
//!
//! Parameterized by two async closures, `process_item` and `get_next_items`,
//! so the pool needs no knowledge of item types beyond hashability. Built on
//! [`tokio::sync::Mutex`] + [`tokio::sync::Semaphore`] /
//! [`tokio::time::timeout`], the same primitives `rate_limit::retry_with_backoff`
//! uses for its own timeout loop.
//!
//! `process_item` always returns `Vec<R>`, merged into the result set.

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Semaphore};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

struct QueueState<T> {
    queue: VecDeque<T>,
    processed: HashSet<T>,
    in_flight: usize,
}

/// Run `initial_items` through a dedup-then-expand graph traversal.
///
/// `concurrency` workers pull items from a shared queue, skip anything
/// already processed, run `process_item` (results union-merged) and
/// `get_next_items` (newly discovered items enqueued unless already
/// processed) under `worker_timeout`, and swallow individual item failures.
/// Returns once the queue is empty and no worker is mid-item.
pub async fn process_with_queue<T, R, PF, NF>(
    initial_items: Vec<T>,
    concurrency: usize,
    worker_timeout: Duration,
    process_item: PF,
    get_next_items: NF,
) -> HashSet<R>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
    R: Eq + Hash + Send + 'static,
    PF: Fn(T) -> BoxFuture<'static, Vec<R>> + Send + Sync + 'static,
    NF: Fn(T) -> BoxFuture<'static, Vec<T>> + Send + Sync + 'static,
{
    if initial_items.is_empty() {
        return HashSet::new();
    }

    let state = Arc::new(Mutex::new(QueueState {
        queue: VecDeque::from(initial_items),
        processed: HashSet::new(),
        in_flight: 0,
    }));
    let results: Arc<Mutex<HashSet<R>>> = Arc::new(Mutex::new(HashSet::new()));
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let process_item = Arc::new(process_item);
    let get_next_items = Arc::new(get_next_items);

    let mut handles = Vec::with_capacity(concurrency.max(1));
    for _ in 0..concurrency.max(1) {
        let state = Arc::clone(&state);
        let results = Arc::clone(&results);
        let semaphore = Arc::clone(&semaphore);
        let process_item = Arc::clone(&process_item);
        let get_next_items = Arc::clone(&get_next_items);

        handles.push(tokio::spawn(async move {
            loop {
                let item = {
                    let mut guard = state.lock().await;
                    match guard.queue.pop_front() {
                        Some(item) => {
                            if guard.processed.contains(&item) {
                                continue;
                            }
                            guard.processed.insert(item.clone());
                            guard.in_flight += 1;
                            item
                        }
                        None => {
                            if guard.in_flight == 0 {
                                return;
                            }
                            drop(guard);
                            tokio::time::sleep(Duration::from_millis(500)).await;
                            continue;
                        }
                    }
                };

                let permit = semaphore.acquire().await.expect("semaphore is never closed");
                let item_results =
                    tokio::time::timeout(worker_timeout, process_item(item.clone()))
                        .await
                        .unwrap_or_default();
                drop(permit);
                if !item_results.is_empty() {
                    results.lock().await.extend(item_results);
                }

                let next_items = tokio::time::timeout(worker_timeout, get_next_items(item))
                    .await
                    .unwrap_or_default();

                let mut guard = state.lock().await;
                for next in next_items {
                    if !guard.processed.contains(&next) {
                        guard.queue.push_back(next);
                    }
                }
                guard.in_flight -= 1;
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    Arc::try_unwrap(results)
        .map(Mutex::into_inner)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod tests;
