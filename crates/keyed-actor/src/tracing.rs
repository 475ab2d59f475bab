//! # Log Output
//!
//! Subscriber setup shared by the binary and by tests that want to see actor logs.
//!
//! The actor loop logs one line per request with the record type as `entity_type`,
//! so the subscriber drops the module path (`with_target(false)`) and uses the compact
//! formatter, which prints enclosing spans inline:
//!
//! ```text
//! INFO order_12: Created entity_type="Order"
//! WARN duplicate_7: Request failed entity_type="Order" error=Item already exists: Food Canteen/7
//! ```
//!
//! Verbosity comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run            # one line per committed write
//! RUST_LOG=debug cargo run           # adds request payloads and reads
//! RUST_LOG=order_board=debug cargo run
//! ```

/// Installs the global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Calling it twice panics (the global subscriber can only be set once); tests that
/// may race should use [`try_setup_tracing`].
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but returns `false` instead of panicking when a subscriber
/// is already installed.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
