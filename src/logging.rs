//! Diagnostic logging setup.
//!
//! All log output goes to stderr; stdout carries only aggregated counts.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize diagnostics on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`. Stdout is
/// left alone because it may be carrying aggregated output.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // a second init (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
