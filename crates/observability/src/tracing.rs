//! Tracing/logging initialization.
//!
//! JSON logs with timestamps, filtered via `RUST_LOG`. Auth failures are
//! logged at `warn` by the API layer, internal faults at `error`; nothing
//! here ever logs credentials or password material.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Initialize with an explicit fallback filter when `RUST_LOG` is unset.
pub fn init_with_default(fallback: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
