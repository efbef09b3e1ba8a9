//! Test support for fund integration tests.
//!
//! Nothing here belongs in a production flow: vault seeding transfers tokens
//! straight into a vault to simulate a funded position.

pub mod artifacts;
pub mod context;
pub mod error;
pub mod scaffolding;

use std::sync::Once;

use once_cell::sync::Lazy;
use tokio::sync::Mutex as AsyncMutex;

pub use context::TestContext;
pub use error::TestkitError;

static LOG_INIT: Once = Once::new();

/// Serializes tests that send transactions from the shared development
/// accounts. Each client caches its own nonces, so two tests signing as the
/// same account at once would race. Hold the guard for the whole test.
pub static HARNESS_LOCK: Lazy<AsyncMutex<()>> = Lazy::new(|| AsyncMutex::new(()));

/// Install a `tracing` subscriber once per test binary. Honours `RUST_LOG`.
pub fn init_tracing() {
    LOG_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}
