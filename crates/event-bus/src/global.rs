//! # Default Bus
//!
//! A process-wide bus created on first use from [`BusConfig::from_env`]
//! and never torn down. The free functions forward to it, so code that
//! does not need an isolated bus can skip constructing one.
//!
//! ```rust,ignore
//! event_bus::subscribe("order.created", |id: u64| println!("order {id}"))?;
//! event_bus::publish("order.created", (42u64,));
//! ```

use crate::args::IntoArgs;
use crate::bus::Bus;
use crate::callback::IntoCallback;
use crate::config::BusConfig;
use crate::error::BusError;
use std::sync::LazyLock;

static DEFAULT_BUS: LazyLock<Bus> = LazyLock::new(|| Bus::with_config(BusConfig::from_env()));

/// The process-wide default bus.
pub fn default_bus() -> &'static Bus {
    &DEFAULT_BUS
}

/// [`Bus::subscribe`] on the default bus.
///
/// # Errors
///
/// `BusError::InvalidHandler` if `callback` cannot be invoked.
pub fn subscribe<M>(topic: &str, callback: impl IntoCallback<M>) -> Result<(), BusError> {
    DEFAULT_BUS.subscribe(topic, callback)
}

/// [`Bus::subscribe_async`] on the default bus.
///
/// # Errors
///
/// `BusError::InvalidHandler` if `callback` cannot be invoked.
pub fn subscribe_async<M>(
    topic: &str,
    callback: impl IntoCallback<M>,
    transactional: bool,
) -> Result<(), BusError> {
    DEFAULT_BUS.subscribe_async(topic, callback, transactional)
}

/// [`Bus::subscribe_once`] on the default bus.
///
/// # Errors
///
/// `BusError::InvalidHandler` if `callback` cannot be invoked.
pub fn subscribe_once<M>(topic: &str, callback: impl IntoCallback<M>) -> Result<(), BusError> {
    DEFAULT_BUS.subscribe_once(topic, callback)
}

/// [`Bus::subscribe_once_async`] on the default bus.
///
/// # Errors
///
/// `BusError::InvalidHandler` if `callback` cannot be invoked.
pub fn subscribe_once_async<M>(
    topic: &str,
    callback: impl IntoCallback<M>,
) -> Result<(), BusError> {
    DEFAULT_BUS.subscribe_once_async(topic, callback)
}

/// [`Bus::unsubscribe`] on the default bus.
///
/// # Errors
///
/// `BusError::UnknownTopic` if `topic` has no handlers.
pub fn unsubscribe<M>(topic: &str, callback: impl IntoCallback<M>) -> Result<(), BusError> {
    DEFAULT_BUS.unsubscribe(topic, callback)
}

/// [`Bus::publish`] on the default bus.
pub fn publish(topic: &str, args: impl IntoArgs) {
    DEFAULT_BUS.publish(topic, args);
}

/// [`Bus::has_callback`] on the default bus.
pub fn has_callback(topic: &str) -> bool {
    DEFAULT_BUS.has_callback(topic)
}

/// [`Bus::wait_async`] on the default bus.
pub fn wait_async() {
    DEFAULT_BUS.wait_async();
}
