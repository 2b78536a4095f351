//! # Bounded Dispatcher
//!
//! Runs one [`PricingTask`] per frequency on the shared [`WorkerPool`] and
//! collects their outcomes in completion order.
//!
//! - A rejected submission is logged and does not count toward the
//!   expected results.
//! - Each expected result is waited for at most `result_timeout`. A wait
//!   that times out is logged and that result is dropped; the remote call
//!   keeps running.
//! - Fatal results (a service rejection or an unexpected task failure) do
//!   not stop collection. Once every result has been drained, the first
//!   fatal result in completion order becomes the dispatch failure and the
//!   others are logged.

use crate::application::error::{QuotationResult, QuoteError};
use crate::application::services::pricing_task::PricingTask;
use crate::application::services::worker_pool::WorkerPool;
use crate::domain::entities::PricingOutcome;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::time::Duration;
use tokio::time::timeout;

/// Default wait for each result, in milliseconds.
pub const DEFAULT_RESULT_TIMEOUT_MS: u64 = 30_000;

/// What a dispatch collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Non-fatal outcomes, in completion order.
    pub outcomes: Vec<PricingOutcome>,
    /// Tasks handed to the dispatcher.
    pub requested: usize,
    /// Tasks the pool accepted.
    pub accepted: usize,
    /// Result waits that timed out.
    pub timed_out: usize,
}

/// Dispatcher running pricing tasks under bounded concurrency.
#[derive(Debug, Clone)]
pub struct BoundedDispatcher {
    pool: WorkerPool,
    result_timeout: Duration,
}

impl BoundedDispatcher {
    /// Creates a dispatcher on `pool`.
    #[must_use]
    pub fn new(pool: WorkerPool, result_timeout: Duration) -> Self {
        Self {
            pool,
            result_timeout,
        }
    }

    /// The pool tasks run on.
    #[must_use]
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Per-result wait.
    #[must_use]
    pub fn result_timeout(&self) -> Duration {
        self.result_timeout
    }

    /// Dispatches `tasks` and drains their results.
    ///
    /// # Errors
    ///
    /// Returns the first fatal result: `QuoteError::ServiceRejected` for a
    /// service rejection, or the task's own error for an unexpected failure.
    pub async fn dispatch(&self, tasks: Vec<PricingTask>) -> QuotationResult<DispatchReport> {
        let requested = tasks.len();
        let mut pending = FuturesUnordered::new();

        for task in tasks {
            let frequency = task.frequency();
            match self.pool.submit(task.run()) {
                Ok(handle) => pending.push(handle.map(move |joined| (frequency, joined))),
                Err(e) => {
                    tracing::error!(%frequency, error = %e, "pricing task submission rejected");
                }
            }
        }

        let accepted = pending.len();
        let mut outcomes = Vec::with_capacity(accepted);
        let mut first_fatal: Option<QuoteError> = None;
        let mut timed_out = 0;

        for _ in 0..accepted {
            let (frequency, joined) = match timeout(self.result_timeout, pending.next()).await {
                Ok(Some(result)) => result,
                Ok(None) => break,
                Err(_) => {
                    timed_out += 1;
                    tracing::error!(
                        timeout_ms = self.result_timeout.as_millis() as u64,
                        "pricing call timed out"
                    );
                    continue;
                }
            };

            let fatal = match joined {
                Ok(Ok(PricingOutcome::FatalError { message, .. })) => {
                    QuoteError::service_rejected(message)
                }
                Ok(Ok(outcome)) => {
                    outcomes.push(outcome);
                    continue;
                }
                Ok(Err(e)) => e,
                Err(e) => {
                    tracing::error!(%frequency, panicked = e.is_panic(), "pricing task aborted");
                    QuoteError::dispatch_failed(format!("pricing task aborted: {}", e))
                }
            };

            if first_fatal.is_none() {
                first_fatal = Some(fatal);
            } else {
                tracing::error!(%frequency, error = %fatal, "pricing task failed");
            }
        }

        tracing::debug!(
            requested,
            accepted,
            collected = outcomes.len(),
            timed_out,
            "pricing dispatch drained"
        );

        match first_fatal {
            Some(fatal) => Err(fatal),
            None => Ok(DispatchReport {
                outcomes,
                requested,
                accepted,
                timed_out,
            }),
        }
    }
}
