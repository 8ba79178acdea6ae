//! Logging setup for Gym Notes.
//!
//! Stdout carries the interactive prompts, so events are written to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when RUST_LOG is unset; anything chattier would interleave with prompts
const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber for the binary
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route events into the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
