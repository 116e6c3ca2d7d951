//! Structured logging bootstrap.
//!
//! Mirrors the `tracing`/`tracing-subscriber` setup the rest of the
//! workspace's ambient stack expects: a single global subscriber, level
//! controlled by `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the global `tracing` subscriber for binaries and tests that
/// want readable scan output. Safe to call more than once; later calls are
/// no-ops (the underlying `set_global_default` failure is ignored).
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
