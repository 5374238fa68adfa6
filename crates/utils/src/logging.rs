//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_FILTER: &str = "info,server=debug,services=debug,db=info";

/// Install the global fmt subscriber, honouring `RUST_LOG` when it is set.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from tests) is harmless, so the error is dropped.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(env_filter)
        .try_init();
}
