//! # Async Dispatch Executors
//!
//! Asynchronous handlers are handed to an [`Executor`] as a boxed job and
//! run on an execution context independent of the publisher.
//!
//! - [`ThreadExecutor`]: one named OS thread per dispatch (default)
//! - [`TokioExecutor`]: the blocking pool of a tokio runtime

use crate::config::BusConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::warn;

/// A unit of asynchronous dispatch work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// The executor could not start a job. The job has been dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to start async dispatch: {0}")]
pub struct SpawnError(pub String);

/// Runs asynchronous dispatch jobs off the publishing thread.
pub trait Executor: Send + Sync {
    /// Start `job` on an independent execution context.
    ///
    /// On error the job must already be dropped so that the guards it owns
    /// are released.
    fn execute(&self, job: Job) -> Result<(), SpawnError>;
}

/// Spawns a dedicated thread for every job.
#[derive(Debug)]
pub struct ThreadExecutor {
    name: String,
    stack_size: Option<usize>,
    spawned: AtomicU64,
}

impl ThreadExecutor {
    #[must_use]
    pub fn new(config: &BusConfig) -> Self {
        Self {
            name: config.async_thread_name.clone(),
            stack_size: config.async_stack_size,
            spawned: AtomicU64::new(0),
        }
    }

    /// Total number of threads started by this executor.
    #[must_use]
    pub fn spawned(&self) -> u64 {
        self.spawned.load(Ordering::Relaxed)
    }
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::new(&BusConfig::default())
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) -> Result<(), SpawnError> {
        let seq = self.spawned.fetch_add(1, Ordering::Relaxed);
        let mut builder = thread::Builder::new().name(format!("{}-{}", self.name, seq));
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        builder
            .spawn(job)
            .map(drop)
            .map_err(|e| SpawnError(e.to_string()))
    }
}

/// Runs jobs on a tokio runtime's blocking thread pool.
///
/// Handlers are plain blocking closures, so they go to `spawn_blocking`
/// rather than the async worker threads.
///
/// Once the runtime has shut down, tokio cancels new blocking tasks
/// without reporting it to the spawner. `execute` still returns `Ok`; the
/// job is dropped unrun (releasing its guards) and a warning is logged.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Executor for the runtime the caller is running on, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, job: Job) -> Result<(), SpawnError> {
        let task = BlockingJob(Some(job));
        drop(self.handle.spawn_blocking(move || task.run()));
        Ok(())
    }
}

/// A job that logs if it is dropped before it ran.
struct BlockingJob(Option<Job>);

impl BlockingJob {
    fn run(mut self) {
        if let Some(job) = self.0.take() {
            job();
        }
    }
}

impl Drop for BlockingJob {
    fn drop(&mut self) {
        if self.0.is_some() {
            warn!("Async handler dropped: tokio runtime is shut down");
        }
    }
}
