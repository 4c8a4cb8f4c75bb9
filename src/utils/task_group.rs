//! Bounded task groups.
//!
//! Every item gets its own Tokio task, at most `limit` run at once, and the
//! group only returns once all of them have finished. A task that panics is
//! reported as a `TaskFailure` for its key; its siblings are unaffected.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::stream::FuturesUnordered;
use futures::StreamExt;

use crate::app::log_progress;
use crate::config::LOGGING_INTERVAL;
use crate::initialization::init_semaphore;

/// A task that did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub key: String,
    pub message: String,
}

/// Everything a task group produced, in completion order.
#[derive(Debug)]
pub struct GroupReport<T> {
    pub completed: Vec<(String, T)>,
    pub failures: Vec<TaskFailure>,
}

impl<T> GroupReport<T> {
    pub fn total(&self) -> usize {
        self.completed.len() + self.failures.len()
    }
}

/// Runs `task` for every `(key, item)` pair with at most `limit` in flight.
///
/// Progress is logged every `LOGGING_INTERVAL` seconds under `phase`.
pub async fn run_bounded<Item, T, F, Fut>(
    phase: &str,
    items: Vec<(String, Item)>,
    limit: usize,
    task: F,
) -> GroupReport<T>
where
    Item: Send + 'static,
    T: Send + 'static,
    F: Fn(Item) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
{
    let total = items.len();
    let semaphore = init_semaphore(limit);
    let mut tasks = FuturesUnordered::new();

    for (key, item) in items {
        let semaphore = std::sync::Arc::clone(&semaphore);
        let fut = task(item);
        let handle = tokio::spawn(async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire_owned().await.ok();
            fut.await
        });
        tasks.push(async move { (key, handle.await) });
    }

    let start = Instant::now();
    let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
    interval.tick().await;

    let mut report = GroupReport {
        completed: Vec::with_capacity(total),
        failures: Vec::new(),
    };

    loop {
        tokio::select! {
            next = tasks.next() => match next {
                Some((key, Ok(value))) => report.completed.push((key, value)),
                Some((key, Err(join_error))) => {
                    let message = panic_message(join_error);
                    log::error!("{phase}: task for {key} failed: {message}");
                    report.failures.push(TaskFailure { key, message });
                }
                None => break,
            },
            _ = interval.tick() => log_progress(phase, start, report.total(), total),
        }
    }

    log_progress(phase, start, report.total(), total);
    report
}

fn panic_message(join_error: tokio::task::JoinError) -> String {
    if !join_error.is_panic() {
        return join_error.to_string();
    }
    let payload = join_error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
