//! Telemetry initialization.
//!
//! Log output goes to stderr so rendered templates on stdout stay clean.
//! The filter comes from `STENCIL_LOG`, falling back to `RUST_LOG`, then to
//! `"warn"` — unset means warnings only, zero noise.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Safe to call once at startup; a second call is a no-op (tests may have
/// installed a subscriber already).
pub fn init() {
    let filter = EnvFilter::try_from_env("STENCIL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
