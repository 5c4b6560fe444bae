//! # System Lifecycle
//!
//! Starting and stopping the adapter as a unit.
//!
//! [`PosSystem::start`] creates the coalescer and the [`TableAcl`](crate::acl::TableAcl)
//! from an [`AclConfig`], spawns the coalescer, and starts the cache refresher
//! when a refill interval is configured.
//!
//! ## Graceful Shutdown
//!
//! 1. **Abort the refresher** - its in-flight refresh, if any, still lands
//! 2. **Drop the adapter** - closes the coalescer mailbox
//! 3. **Await the coalescer** - it exits once every flight has landed
//!
//! ## Observability
//!
//! Logging is installed by the host process, usually with
//! [`coalesce::tracing::setup_tracing`]:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Lifecycle and landed calls
//! RUST_LOG=debug cargo run     # Cache hits, shared flags, payload sizes
//! ```

pub mod config;
pub mod pos_system;

pub use config::*;
pub use pos_system::*;
