//! Test helpers shared by unit and integration tests.
//!
//! Available under `cfg(test)` and with the `test-utils` feature, which the
//! crate enables for its own dev-dependency so `tests/` can use it.
//!
//! - [`init_test_logging`] installs a test-friendly `tracing` subscriber once
//! - [`GameFixture`] builds a throwaway game installation and mod folder

pub mod fixtures;

pub use fixtures::GameFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for a test run.
///
/// With `level` set, that level is used. Otherwise `RUST_LOG` is honored when
/// present and logging stays off when it is not. Only the first call has an
/// effect.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
