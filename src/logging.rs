//! Tracing subscriber setup for applications embedding the library.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG`, logs at `DEBUG` when `verbose` is set and at `INFO`
/// otherwise. Returns `false` if a global subscriber was already installed,
/// in which case nothing changes.
pub fn setup_tracing(verbose: bool) -> bool {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
