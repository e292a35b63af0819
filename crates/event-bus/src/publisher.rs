//! # Publisher
//!
//! Dispatch side of the bus.
//!
//! ## Algorithm
//!
//! 1. Take the registry lock for the whole call.
//! 2. Visit the topic's handlers in registration order.
//! 3. A once-handler is removed from the live list before it is invoked;
//!    the cursor stays put so the next handler is not skipped.
//! 4. Sync handlers run inline. Async handlers take a pending slot (and
//!    their serialization lock if transactional) and go to the executor.

use crate::args::{Args, IntoArgs};
use crate::bus::Bus;
use crate::executor::Job;
use crate::handler::HandlerRecord;
use std::sync::atomic::Ordering;
use tracing::{debug, error, trace};

/// Publishing-related bus behavior.
pub trait Publisher: Send + Sync {
    /// Invoke every handler of `topic` with `args`.
    fn publish(&self, topic: &str, args: Args);
}

impl Bus {
    /// Publish `args` to every handler of `topic`.
    ///
    /// Synchronous handlers have finished when this returns; asynchronous
    /// ones have only been scheduled. Publishing a topic without handlers
    /// is a no-op.
    ///
    /// # Panics
    ///
    /// A panic raised by a synchronous handler (including an argument
    /// mismatch) propagates to the caller. Handlers visited before it have
    /// already run; the remaining ones are skipped for this call.
    pub fn publish(&self, topic: &str, args: impl IntoArgs) {
        let args = args.into_args();
        let mut registry = self.shared.handlers.lock();
        self.shared.events_published.fetch_add(1, Ordering::Relaxed);

        let Some(handlers) = registry.get_mut(topic) else {
            trace!(topic, "No handlers for topic");
            return;
        };

        debug!(
            topic,
            handlers = handlers.len(),
            args = args.len(),
            "Publishing event"
        );

        let mut cursor = 0;
        while cursor < handlers.len() {
            if handlers[cursor].is_once() {
                let record = handlers.remove(cursor);
                self.dispatch(topic, &record, &args);
            } else {
                self.dispatch(topic, &handlers[cursor], &args);
                cursor += 1;
            }
        }

        if handlers.is_empty() {
            registry.remove(topic);
        }
    }

    fn dispatch(&self, topic: &str, record: &HandlerRecord, args: &Args) {
        let handler = record.callback().name();

        if !record.mode().is_async() {
            trace!(topic, handler, "Invoking handler inline");
            record.invoke(args);
            return;
        }

        let pending = self.shared.pending.register();
        let serial = record.acquire_serial();
        let callback = record.callback().clone();
        let args = args.clone();

        trace!(topic, handler, mode = ?record.mode(), "Scheduling async handler");

        let job: Job = Box::new(move || {
            // Dropped in reverse order: pending slot first, serial lock last.
            let _serial = serial;
            let _pending = pending;
            callback.invoke(&args);
        });

        if let Err(e) = self.shared.executor.execute(job) {
            error!(topic, handler, error = %e, "Async handler dropped");
        }
    }
}

impl Publisher for Bus {
    fn publish(&self, topic: &str, args: Args) {
        Bus::publish(self, topic, args);
    }
}
