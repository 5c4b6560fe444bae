use super::AclConfig;
use crate::acl::TableAcl;
use crate::cache::{CacheError, MemoryTableCache};
use crate::clients::PosApi;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The running adapter: coalescer actor, optional refresher, and the
/// [`TableAcl`] handle callers use.
pub struct PosSystem {
    pub acl: TableAcl,
    actor_handle: JoinHandle<()>,
    refresher_handle: Option<JoinHandle<()>>,
}

impl PosSystem {
    /// Wires and starts everything described by `config`.
    ///
    /// Fails only if the configured cache cannot be built.
    pub fn start(api: Arc<dyn PosApi>, config: AclConfig) -> Result<Self, CacheError> {
        let mut builder = TableAcl::builder(api)
            .credential(config.credential)
            .upstream_timeout(config.upstream_timeout)
            .buffer_size(config.buffer_size);

        if let Some(max_entries) = config.cache_max_entries {
            let cache = MemoryTableCache::new(max_entries, config.cache_ttl)?;
            builder = builder.cache(Arc::new(cache));
        }

        let (actor, acl) = builder.build();
        let actor_handle = tokio::spawn(actor.run());
        let refresher_handle = config
            .refill_interval
            .map(|interval| acl.autofill_cache(interval));

        info!(
            cached = config.cache_max_entries.is_some(),
            refresher = refresher_handle.is_some(),
            "POS system started"
        );

        Ok(Self {
            acl,
            actor_handle,
            refresher_handle,
        })
    }

    /// Stops the refresher, then waits for the coalescer to land any flight
    /// still in the air. Clones of `acl` held elsewhere keep the coalescer
    /// alive until they are dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        if let Some(handle) = self.refresher_handle {
            handle.abort();
            let _ = handle.await;
            debug!("Refresher stopped");
        }

        drop(self.acl);
        self.actor_handle
            .await
            .map_err(|e| format!("Coalescer task failed: {e}"))?;

        info!("POS system shut down");
        Ok(())
    }
}
