//! # Worker Pool
//!
//! A fixed-size pool of concurrent workers shared by every quote call of an
//! engine instance.
//!
//! Two limits apply:
//!
//! - at most `worker_count` tasks run at once;
//! - at most `queue_capacity` tasks are admitted (running plus waiting for a
//!   worker). A submission beyond that is rejected immediately, as is any
//!   submission after [`WorkerPool::shutdown`].
//!
//! Admitted tasks are spawned on the ambient Tokio runtime and are never
//! cancelled by the pool; dropping the returned handle detaches the task.
//!
//! # Examples
//!
//! ```
//! use policy_quotation::application::services::worker_pool::WorkerPool;
//!
//! # tokio_test::block_on(async {
//! let pool = WorkerPool::new(4, 16);
//! let handle = pool.submit(async { 21 * 2 }).unwrap();
//! assert_eq!(handle.await.unwrap(), 42);
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Semaphore, TryAcquireError};
use tokio::task::JoinHandle;

/// Reason a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Every admission slot is taken.
    #[error("worker pool saturated")]
    Saturated,
    /// The pool no longer accepts work.
    #[error("worker pool shut down")]
    ShutDown,
}

#[derive(Debug)]
struct PoolState {
    workers: Arc<Semaphore>,
    admission: Arc<Semaphore>,
    worker_count: usize,
    queue_capacity: usize,
}

/// Bounded pool of concurrent workers.
///
/// Cloning is cheap and yields a handle to the same pool.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    state: Arc<PoolState>,
}

impl WorkerPool {
    /// Creates a pool.
    ///
    /// `worker_count` is raised to 1 and `queue_capacity` to `worker_count`
    /// when given smaller.
    #[must_use]
    pub fn new(worker_count: usize, queue_capacity: usize) -> Self {
        let worker_count = worker_count.max(1);
        let queue_capacity = queue_capacity.max(worker_count);
        Self {
            state: Arc::new(PoolState {
                workers: Arc::new(Semaphore::new(worker_count)),
                admission: Arc::new(Semaphore::new(queue_capacity)),
                worker_count,
                queue_capacity,
            }),
        }
    }

    /// Submits a task.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Saturated` when no admission slot is free and
    /// `SubmitError::ShutDown` after [`shutdown`](Self::shutdown).
    pub fn submit<F>(&self, task: F) -> Result<JoinHandle<F::Output>, SubmitError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let admitted = match Arc::clone(&self.state.admission).try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::NoPermits) => return Err(SubmitError::Saturated),
            Err(TryAcquireError::Closed) => return Err(SubmitError::ShutDown),
        };
        let workers = Arc::clone(&self.state.workers);

        Ok(tokio::spawn(async move {
            let _admitted = admitted;
            let _worker = workers.acquire_owned().await;
            task.await
        }))
    }

    /// Stops admitting new tasks. Tasks already admitted run to completion.
    pub fn shutdown(&self) {
        self.state.admission.close();
    }

    /// Returns true once [`shutdown`](Self::shutdown) was called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.state.admission.is_closed()
    }

    /// Number of concurrent workers.
    #[inline]
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.state.worker_count
    }

    /// Maximum number of admitted tasks.
    #[inline]
    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.state.queue_capacity
    }

    /// Workers currently idle.
    #[must_use]
    pub fn idle_workers(&self) -> usize {
        self.state.workers.available_permits()
    }
}
