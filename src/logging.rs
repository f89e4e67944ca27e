//! Logging initialization.
//!
//! Diagnostics go through `tracing` and are written to stderr. `RUST_LOG`
//! always wins; otherwise the level follows the CLI verbosity.

use crate::output::Verbosity;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Guards against installing the global subscriber twice.
static INIT_ONCE: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "warn,media_manifest=debug",
    }
}

/// Installs the global `tracing` subscriber. Later calls are no-ops.
pub fn init(verbosity: Verbosity) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        // Another subscriber may already be installed by an embedding program.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
