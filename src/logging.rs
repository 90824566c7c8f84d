//! Logging configuration for db-relay.
//!
//! Logs go to stderr so that rendered query output on stdout stays clean for
//! piping and test capture.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging with an `RUST_LOG`-style filter.
///
/// Defaults to `info` when no filter is set in the environment.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
