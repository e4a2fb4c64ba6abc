//! Shared test setup for the integration suites.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a `tracing` subscriber once so `trace!`/`debug!` output from
/// `orchestrator`, `tile_reducer`, and `boundary_fixup` is visible when
/// running with `RUST_LOG` set, mirroring the teacher crate's convention
/// of wiring a subscriber at test/binary entry points rather than inside
/// library code.
#[allow(dead_code)]
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
