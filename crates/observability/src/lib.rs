//! Local diagnostics for processes that publish events.
//!
//! Published events go to the message bus; this crate only sets up the
//! process's own `tracing` output (where publish failures are reported).

/// Initialize process-wide tracing with settings from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::TracingConfig::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, TracingConfig};
