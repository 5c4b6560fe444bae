//! # Table ACL
//!
//! Anti-corruption layer between a table-service application and a
//! point-of-sale backend reached over RPC.
//!
//! - **[model]**: the domain [`Table`](model::Table) and the upstream check shapes.
//! - **[projector]**: pure mapping from upstream checks to tables.
//! - **[cache]**: the [`TableCache`](cache::TableCache) capability and its backends.
//! - **[clients]**: the [`PosApi`](clients::PosApi) capability and a scripted double.
//! - **[acl]**: [`TableAcl`](acl::TableAcl), the adapter itself.
//! - **[lifecycle]**: configuration and [`PosSystem`](lifecycle::PosSystem).
//!
//! Concurrent cold lookups share a single upstream call through the
//! [`coalesce`] runtime.

pub mod acl;
pub mod cache;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod projector;
