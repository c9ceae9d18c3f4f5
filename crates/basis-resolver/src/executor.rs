//! Bounded worker pool the expander and downloader submit child-fetch and
//! artifact-fetch tasks to. Each spawned task awaits a semaphore permit
//! before running, so at most `concurrency` providers are doing I/O at
//! once; the driver awaits each task's result individually, in whatever
//! order it needs, and can shut the whole pool down on the first failure.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinError, JoinHandle};

/// A bounded pool of concurrently-running tasks.
pub struct Executor {
    semaphore: Arc<Semaphore>,
    handles: Vec<AbortHandle>,
}

/// A task submitted to an `Executor`, awaited individually by the caller
/// that spawned it.
pub struct PendingFetch<T> {
    handle: JoinHandle<T>,
}

impl Executor {
    pub fn new(concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            handles: Vec::new(),
        }
    }

    /// Spawn `task` behind a permit from this pool's semaphore.
    pub fn spawn<F, T>(&mut self, task: F) -> PendingFetch<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let semaphore = Arc::clone(&self.semaphore);
        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("executor semaphore is never closed");
            task.await
        });
        self.handles.push(handle.abort_handle());
        PendingFetch { handle }
    }

    /// Abort every task still in flight. Already-completed tasks are
    /// unaffected; in-flight tasks are not joined before returning.
    pub fn shutdown(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl<T> PendingFetch<T> {
    pub async fn await_result(self) -> Result<T, JoinError> {
        self.handle.await
    }
}
