//! In-memory table cache with LRU eviction.
//!
//! Thread-safe via `Arc<RwLock<LruCache>>`. Entries may carry a TTL, checked
//! lazily on read.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use super::{CacheError, Result, TableCache};
use crate::model::{Table, TableIdentity};

#[derive(Debug, Clone)]
struct CacheEntry {
    table: Table,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(table: Table, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { table, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Bounded in-process [`TableCache`].
#[derive(Debug, Clone)]
pub struct MemoryTableCache {
    store: Arc<RwLock<LruCache<TableIdentity, CacheEntry>>>,
    ttl: Option<Duration>,
}

impl MemoryTableCache {
    /// Creates a cache holding at most `max_entries` tables.
    ///
    /// Fails if `max_entries` is 0.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            CacheError::OperationFailed("max_entries must be > 0".to_string())
        })?;
        Ok(Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl,
        })
    }

    /// Number of entries currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl TableCache for MemoryTableCache {
    async fn get_table(&self, identity: &TableIdentity) -> Result<Option<Table>> {
        // `get` bumps recency, hence the write lock.
        let mut store = self.store.write().await;

        let expired = match store.get(identity) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.table.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            store.pop(identity);
        }
        Ok(None)
    }

    async fn add_tables(&self, tables: Vec<Table>) -> Result<()> {
        let mut store = self.store.write().await;
        for table in tables {
            let identity = table.identity.clone();
            store.put(identity, CacheEntry::new(table, self.ttl));
        }
        tracing::trace!(size = store.len(), "Tables cached");
        Ok(())
    }
}
