//! # Pending Dispatch Tracker
//!
//! Counts asynchronous dispatches that were scheduled but have not
//! finished, and lets callers block until the count drains to zero.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    count: Mutex<usize>,
    drained: Condvar,
}

/// Wait-group over in-flight asynchronous dispatches.
#[derive(Clone, Default)]
pub struct PendingTracker {
    inner: Arc<Inner>,
}

impl PendingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one in-flight dispatch.
    ///
    /// The slot is released when the guard is dropped, including while
    /// unwinding from a panicking handler.
    #[must_use]
    pub fn register(&self) -> PendingGuard {
        *self.inner.count.lock() += 1;
        PendingGuard {
            inner: self.inner.clone(),
        }
    }

    /// Number of dispatches currently in flight.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.inner.count.lock()
    }

    /// Block until the count reaches zero.
    ///
    /// Dispatches registered while waiting extend the wait; there is no
    /// timeout.
    pub fn wait(&self) {
        let mut count = self.inner.count.lock();
        while *count > 0 {
            self.inner.drained.wait(&mut count);
        }
    }
}

/// Releases one pending slot on drop.
pub struct PendingGuard {
    inner: Arc<Inner>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut count = self.inner.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.inner.drained.notify_all();
        }
    }
}
