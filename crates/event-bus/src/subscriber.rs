//! # Subscriber
//!
//! Registration side of the bus: subscribe variants and unsubscribe.

use crate::bus::Bus;
use crate::callback::{Callback, IntoCallback};
use crate::error::BusError;
use crate::handler::{DispatchMode, HandlerRecord};
use tracing::{debug, warn};

/// Subscription-related bus behavior.
pub trait Subscriber: Send + Sync {
    /// Subscribe a handler run inline on every publish of `topic`.
    fn subscribe(&self, topic: &str, callback: Callback) -> Result<(), BusError>;

    /// Subscribe a handler run off the publishing thread.
    ///
    /// `transactional` handlers never run concurrently with themselves.
    fn subscribe_async(
        &self,
        topic: &str,
        callback: Callback,
        transactional: bool,
    ) -> Result<(), BusError>;

    /// Subscribe a handler removed after its first dispatch.
    fn subscribe_once(&self, topic: &str, callback: Callback) -> Result<(), BusError>;

    /// Subscribe an asynchronous handler removed after its first dispatch.
    fn subscribe_once_async(&self, topic: &str, callback: Callback) -> Result<(), BusError>;

    /// Remove the first handler of `topic` matching `callback`.
    fn unsubscribe(&self, topic: &str, callback: Callback) -> Result<(), BusError>;
}

impl Bus {
    /// Subscribe `callback` to `topic`; it runs inline on the publishing
    /// thread.
    ///
    /// # Errors
    ///
    /// `BusError::InvalidHandler` if `callback` cannot be invoked.
    pub fn subscribe<M>(&self, topic: &str, callback: impl IntoCallback<M>) -> Result<(), BusError> {
        self.register(topic, callback.into_callback(), false, DispatchMode::Sync)
    }

    /// Subscribe `callback` to `topic`; it runs on an independent
    /// execution context.
    ///
    /// With `transactional` set, successive invocations of this handler
    /// are serialized in scheduling order.
    ///
    /// # Errors
    ///
    /// `BusError::InvalidHandler` if `callback` cannot be invoked.
    pub fn subscribe_async<M>(
        &self,
        topic: &str,
        callback: impl IntoCallback<M>,
        transactional: bool,
    ) -> Result<(), BusError> {
        self.register(
            topic,
            callback.into_callback(),
            false,
            DispatchMode::asynchronous(transactional),
        )
    }

    /// Subscribe `callback` to `topic` for a single inline dispatch.
    ///
    /// # Errors
    ///
    /// `BusError::InvalidHandler` if `callback` cannot be invoked.
    pub fn subscribe_once<M>(
        &self,
        topic: &str,
        callback: impl IntoCallback<M>,
    ) -> Result<(), BusError> {
        self.register(topic, callback.into_callback(), true, DispatchMode::Sync)
    }

    /// Subscribe `callback` to `topic` for a single asynchronous dispatch.
    ///
    /// # Errors
    ///
    /// `BusError::InvalidHandler` if `callback` cannot be invoked.
    pub fn subscribe_once_async<M>(
        &self,
        topic: &str,
        callback: impl IntoCallback<M>,
    ) -> Result<(), BusError> {
        self.register(topic, callback.into_callback(), true, DispatchMode::Async)
    }

    /// Remove the first handler of `topic` that is the same handler as
    /// `callback`: a clone of the subscribed callback, or one built from
    /// the same closure expression or `fn` item.
    ///
    /// Succeeds without removing anything if no handler matches.
    ///
    /// # Errors
    ///
    /// `BusError::UnknownTopic` if `topic` has no handlers.
    pub fn unsubscribe<M>(&self, topic: &str, callback: impl IntoCallback<M>) -> Result<(), BusError> {
        let callback = callback.into_callback();
        let mut registry = self.shared.handlers.lock();

        let handlers = match registry.get_mut(topic) {
            Some(handlers) if !handlers.is_empty() => handlers,
            _ => return Err(BusError::unknown_topic(topic)),
        };

        let Some(idx) = handlers
            .iter()
            .position(|record| record.callback().same_handler(&callback))
        else {
            debug!(topic, handler = callback.name(), "Handler not subscribed, nothing to remove");
            return Ok(());
        };

        // Vec::remove shifts the tail left, keeping registration order.
        handlers.remove(idx);
        let remaining = handlers.len();
        if remaining == 0 {
            registry.remove(topic);
        }

        debug!(topic, handler = callback.name(), remaining, "Handler unsubscribed");
        Ok(())
    }

    fn register(
        &self,
        topic: &str,
        callback: Callback,
        once: bool,
        mode: DispatchMode,
    ) -> Result<(), BusError> {
        let mut registry = self.shared.handlers.lock();

        if !callback.is_invocable() {
            warn!(topic, handler = callback.name(), "Rejected non-invocable handler");
            return Err(BusError::invalid_handler(
                topic,
                format!("{} is not a callable", callback.name()),
            ));
        }

        debug!(topic, handler = callback.name(), once, mode = ?mode, "Handler subscribed");

        registry
            .entry(topic.to_string())
            .or_default()
            .push(HandlerRecord::new(callback, once, mode));
        Ok(())
    }
}

impl Subscriber for Bus {
    fn subscribe(&self, topic: &str, callback: Callback) -> Result<(), BusError> {
        Bus::subscribe(self, topic, callback)
    }

    fn subscribe_async(
        &self,
        topic: &str,
        callback: Callback,
        transactional: bool,
    ) -> Result<(), BusError> {
        Bus::subscribe_async(self, topic, callback, transactional)
    }

    fn subscribe_once(&self, topic: &str, callback: Callback) -> Result<(), BusError> {
        Bus::subscribe_once(self, topic, callback)
    }

    fn subscribe_once_async(&self, topic: &str, callback: Callback) -> Result<(), BusError> {
        Bus::subscribe_once_async(self, topic, callback)
    }

    fn unsubscribe(&self, topic: &str, callback: Callback) -> Result<(), BusError> {
        Bus::unsubscribe(self, topic, callback)
    }
}
