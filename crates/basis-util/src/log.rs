//! Installs the process-wide `tracing` subscriber.
//!
//! The resolver and its extensions only emit `tracing` events; deciding how
//! (and whether) to display them is left to the embedder. This helper
//! mirrors the `RUST_LOG`-driven setup a CLI entry point typically wires up,
//! so embedders that don't need anything fancier can call it once at
//! startup.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber reading its filter from `RUST_LOG`, defaulting
/// to `info` when unset. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
