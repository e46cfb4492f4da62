//! One-shot tracing setup for integration test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install a test-friendly subscriber once per process.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, then defaults to
/// `warn` so passing runs stay quiet. Output goes through the test writer so
/// the harness captures it per test.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let directives = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_owned());

        fmt()
            .with_env_filter(EnvFilter::new(directives))
            .with_test_writer()
            .with_target(true)
            .without_time()
            .try_init()
            .ok();
    });
}
