//! Shared test setup: one global tracing subscriber for all tests in a binary.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install an `EnvFilter`-driven stderr subscriber once per process.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at debug and
/// dependencies at warn.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,nodetree=debug"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_thread_names(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if subscriber.try_init().is_err() {
            eprintln!("tracing subscriber already installed");
        }
        debug!("test setup complete");
    });
}
