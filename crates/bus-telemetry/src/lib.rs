//! # Bus Telemetry
//!
//! Logging setup for binaries and test harnesses embedding the event bus.
//! Libraries only emit `tracing` events; this crate installs the
//! subscriber that prints them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bus_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//!
//!     // Bus logs are now written to stdout
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `event-bus` | Service name in the startup line |
//! | `BUS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BUS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `BUS_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Initialize logging for the process.
///
/// Returns a guard to hold for the lifetime of the application.
///
/// # Errors
///
/// See [`TelemetryError`]. Only the first successful call in a process
/// installs a subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
