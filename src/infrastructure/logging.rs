//! Logging configuration
//!
//! Initializes tracing for the application. Logs go to stderr; stdout is
//! reserved for the release diagnostics.

/// Environment variable that overrides the configured level
pub const LOG_ENV: &str = "SHIPLINE_LOG";

/// Initializes logging with the specified level
///
/// `SHIPLINE_LOG` takes precedence and accepts full filter directives.
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
