//! Process-wide tracing/logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process with the default `info` filter.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    init_with_default("info");
}

/// Initialize tracing, using `default_filter` when `RUST_LOG` is unset.
///
/// Output is JSON lines so log shippers can ingest it without parsing
/// heuristics. Credential material must never reach a log statement; this
/// layer cannot scrub it after the fact.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_target(false)
        .try_init();
}
