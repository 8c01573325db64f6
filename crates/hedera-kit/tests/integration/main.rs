//! Integration tests for hedera-kit.
//!
//! Run with: `cargo test --test integration`
//!
//! Set `RUST_LOG=hedera_kit=debug` to see decode and schema logging.

mod decoding;
mod properties;
mod vectors;

/// Install a test-friendly subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
