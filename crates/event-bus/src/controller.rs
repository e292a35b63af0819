//! # Controller
//!
//! Checking handler presence and waiting for asynchronous work.

use crate::bus::Bus;

/// Bus control behavior.
pub trait Controller: Send + Sync {
    /// Whether any handler is subscribed to `topic`.
    fn has_callback(&self, topic: &str) -> bool;

    /// Block until every scheduled asynchronous handler has finished.
    fn wait_async(&self);
}

impl Bus {
    /// Whether `topic` has at least one handler.
    #[must_use]
    pub fn has_callback(&self, topic: &str) -> bool {
        self.shared
            .handlers
            .lock()
            .get(topic)
            .is_some_and(|handlers| !handlers.is_empty())
    }

    /// Block until the pending asynchronous dispatch count drops to zero.
    ///
    /// Dispatches scheduled by other threads during the wait are waited
    /// for as well. There is no timeout.
    pub fn wait_async(&self) {
        self.shared.pending.wait();
    }
}

impl Controller for Bus {
    fn has_callback(&self, topic: &str) -> bool {
        Bus::has_callback(self, topic)
    }

    fn wait_async(&self) {
        Bus::wait_async(self);
    }
}
