//! Testing utilities for code that owns resources.
//!
//! This module provides:
//! - A recording deleter that logs every release
//! - Assertions over the release log
//! - One-shot tracing setup for test binaries

mod assertions;
mod recorder;

pub use assertions::{assert_no_double_release, assert_nothing_released, assert_released_once};
pub use recorder::ReleaseRecorder;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a `tracing` subscriber that writes to stderr, once per process.
///
/// The filter comes from `RUST_LOG` and defaults to `resguard=trace`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("resguard=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}
