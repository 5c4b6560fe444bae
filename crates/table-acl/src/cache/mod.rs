//! Table cache capability.
//!
//! The adapter talks to any [`TableCache`]. [`NoCache`] is the default and turns
//! the read path into "always ask upstream"; [`MemoryTableCache`] is a bounded
//! in-process backend. Eviction and expiry are each backend's own business.

mod error;
mod memory;

pub use error::{CacheError, Result};
pub use memory::MemoryTableCache;

use crate::model::{Table, TableIdentity};
use async_trait::async_trait;

/// Point lookup and bulk insert of tables.
#[async_trait]
pub trait TableCache: Send + Sync {
    /// Returns the cached table, or `None` on a miss. A miss is not an error.
    async fn get_table(&self, identity: &TableIdentity) -> Result<Option<Table>>;

    /// Inserts or replaces every table, visible to all later lookups.
    async fn add_tables(&self, tables: Vec<Table>) -> Result<()>;
}

/// Cache that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl TableCache for NoCache {
    async fn get_table(&self, _identity: &TableIdentity) -> Result<Option<Table>> {
        Ok(None)
    }

    async fn add_tables(&self, _tables: Vec<Table>) -> Result<()> {
        Ok(())
    }
}

/// String key for backends that store tables under flat keys.
///
/// Format: `table:{revenue_center}:{floor}:{section}:{table_id}`
pub fn table_key(identity: &TableIdentity) -> String {
    format!(
        "table:{}:{}:{}:{}",
        identity.revenue_center, identity.floor, identity.section, identity.table_id
    )
}
