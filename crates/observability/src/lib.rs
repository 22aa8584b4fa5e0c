//! Tracing and logging setup shared by binaries and tests.

/// Initialize process-wide tracing/logging.
///
/// Reads `RUST_LOG` (default `info`) and `LOG_FORMAT` (`json` or `pretty`,
/// default `json`). Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

pub use self::tracing::LogFormat;

/// Tracing configuration (filters, formatting).
pub mod tracing;
