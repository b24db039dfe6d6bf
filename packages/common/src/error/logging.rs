//! Structured logging bootstrap
//!
//! Provides env_logger-based logging wired into the standard log crate.
//! Library crates emit `tracing` events, which reach the `log` facade (and so
//! this logger) when no `tracing` subscriber is installed.

use log::{debug, info, warn};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs, including socket selection
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=tlsprov=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs a logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log which connection implementation was chosen for a new socket
    pub fn log_socket_selection(kind: &str, reason: &str) {
        debug!("Socket selection: {kind} ({reason})");
    }

    /// Log release of a native handle
    pub fn log_handle_release(component: &str, handle: u64) {
        debug!("Released native handle {handle} owned by {component}");
    }

    /// Log a captured initialization failure that will surface on first use
    pub fn log_delayed_init_failure(component: &str, error: &dyn std::error::Error) {
        warn!(
            "Initialization of {} failed, deferring error to first use: {}",
            component, error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_operations() {
        LoggingTransformer::init_test();

        // These should not panic
        LoggingTransformer::log_socket_selection("engine", "forced by configuration");
        LoggingTransformer::log_handle_release("crl entry", 7);
        let err = std::io::Error::other("no trust material");
        LoggingTransformer::log_delayed_init_failure("socket factory", &err);
    }
}
