//! # Integration Tests
//!
//! End-to-end scenarios against the public `event_bus` API.

pub mod dispatch;

/// Install a quiet subscriber once so bus logs show up under
/// `BUS_LOG_LEVEL=debug cargo test -- --nocapture`.
///
/// Uses the regular environment configuration; only the level default is
/// lowered to `warn` when neither `BUS_LOG_LEVEL` nor `RUST_LOG` is set.
#[cfg(test)]
pub(crate) fn init_logging() {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let mut config = bus_telemetry::TelemetryConfig::from_env();
        if std::env::var_os("BUS_LOG_LEVEL").is_none() && std::env::var_os("RUST_LOG").is_none() {
            config.log_level = "warn".to_string();
        }
        // Keep the guard alive for the whole test binary.
        if let Ok(guard) = bus_telemetry::init_telemetry(&config) {
            std::mem::forget(guard);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn test_init_logging_uses_environment_config() {
        init_logging();
        init_logging();

        let level_from_env =
            std::env::var_os("BUS_LOG_LEVEL").is_some() || std::env::var_os("RUST_LOG").is_some();
        if !level_from_env {
            assert!(tracing::enabled!(tracing::Level::WARN));
            assert!(!tracing::enabled!(tracing::Level::INFO));
        }
    }
}
