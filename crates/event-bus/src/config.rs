//! Bus configuration from defaults, environment variables or any serde source.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for a [`Bus`](crate::Bus).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Name prefix for threads running asynchronous handlers.
    pub async_thread_name: String,

    /// Stack size in bytes for those threads (platform default if unset).
    pub async_stack_size: Option<usize>,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            async_thread_name: crate::DEFAULT_ASYNC_THREAD_NAME.to_string(),
            async_stack_size: None,
        }
    }
}

impl BusConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EVENT_BUS_THREAD_NAME`: async worker thread name prefix (default: event-bus-async)
    /// - `EVENT_BUS_STACK_SIZE`: async worker stack size in bytes (default: platform)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            async_thread_name: lookup("EVENT_BUS_THREAD_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.async_thread_name),

            async_stack_size: lookup("EVENT_BUS_STACK_SIZE")
                .and_then(|v| v.parse().ok())
                .or(defaults.async_stack_size),
        }
    }
}
