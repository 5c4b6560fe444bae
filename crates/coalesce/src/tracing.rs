//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. The coalescer logs through the same subscriber:
//!
//! ```text
//! INFO Coalescer started
//! DEBUG Leading new call key=all_open_checks
//! DEBUG Joined in-flight call key=all_open_checks waiters=2
//! INFO Call landed key=all_open_checks waiters=2
//! ```
//!
//! ```bash
//! RUST_LOG=info cargo run             # lifecycle and landed calls
//! RUST_LOG=debug cargo run            # joins, cache hits, payloads
//! RUST_LOG=coalesce=debug cargo run   # only the coalescer
//! ```

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
