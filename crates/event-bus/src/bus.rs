//! # Bus
//!
//! The registry shared by the subscriber, publisher and controller roles.
//!
//! ## Locking
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ registry lock (one per bus, all topics)                      │
//! │   subscribe / unsubscribe / has_callback : whole body        │
//! │   publish : whole body, including every sync handler call    │
//! └──────────────────────────────────────────────────────────────┘
//!            │ async handlers are scheduled under the lock
//!            ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ executor (independent context)                               │
//! │   invoke → release pending slot → release serial lock        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::config::BusConfig;
use crate::executor::{Executor, ThreadExecutor};
use crate::handler::HandlerRecord;
use crate::pending::PendingTracker;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) type Registry = HashMap<String, Vec<HandlerRecord>>;

pub(crate) struct Shared {
    /// Topic -> handlers in registration order.
    pub(crate) handlers: Mutex<Registry>,
    pub(crate) pending: PendingTracker,
    pub(crate) executor: Arc<dyn Executor>,
    pub(crate) events_published: AtomicU64,
}

/// In-process publish/subscribe bus keyed by topic name.
///
/// `Bus` is `Clone`; clones share the same registry.
///
/// # Deadlocks
///
/// The registry lock is held while synchronous handlers run. A synchronous
/// handler that calls back into the same bus (publish, subscribe,
/// unsubscribe, has_callback) deadlocks, and a slow one stalls every other
/// caller on every topic. Publishing to a transactional handler whose
/// previous invocation is still running also waits under the lock.
#[derive(Clone)]
pub struct Bus {
    pub(crate) shared: Arc<Shared>,
}

impl Bus {
    /// Create an empty bus that runs async handlers on dedicated threads.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Create an empty bus from configuration.
    #[must_use]
    pub fn with_config(config: BusConfig) -> Self {
        Self::with_executor(Arc::new(ThreadExecutor::new(&config)))
    }

    /// Create an empty bus that hands async handlers to `executor`.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn Executor>) -> Self {
        Self {
            shared: Arc::new(Shared {
                handlers: Mutex::new(HashMap::new()),
                pending: PendingTracker::new(),
                executor,
                events_published: AtomicU64::new(0),
            }),
        }
    }

    /// Number of handlers registered for `topic`.
    #[must_use]
    pub fn handler_count(&self, topic: &str) -> usize {
        self.shared.handlers.lock().get(topic).map_or(0, Vec::len)
    }

    /// Topics with at least one handler, sorted.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .shared
            .handlers
            .lock()
            .iter()
            .filter(|(_, handlers)| !handlers.is_empty())
            .map(|(topic, _)| topic.clone())
            .collect();
        topics.sort();
        topics
    }

    /// Asynchronous dispatches scheduled but not yet finished.
    #[must_use]
    pub fn pending_async(&self) -> usize {
        self.shared.pending.count()
    }

    /// Total publish calls, including those on topics without handlers.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.shared.events_published.load(Ordering::Relaxed)
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("topics", &self.topics())
            .field("pending_async", &self.pending_async())
            .field("events_published", &self.events_published())
            .finish()
    }
}
