//! Table lookup: cache first, then one coalesced scan of every open check.

use super::{AclError, OpenChecks, TableAcl, ALL_CHECKS_KEY};
use crate::model::{Table, TableIdentity};
use crate::projector;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

impl TableAcl {
    /// Finds the open check seated at the given table.
    ///
    /// Served from the cache when possible. On a miss every open check is fetched
    /// (joining any fetch already running), the cache is refilled, and the first
    /// check in upstream order whose location matches is returned.
    #[instrument(skip(self))]
    pub async fn fetch_table(
        &self,
        revenue_center: &str,
        floor: &str,
        section: &str,
        table_id: &str,
    ) -> Result<Table, AclError> {
        let identity = TableIdentity::new(revenue_center, floor, section, table_id);
        self.fetch_table_by_identity(&identity).await
    }

    #[instrument(skip(self, identity), fields(identity = %identity))]
    pub async fn fetch_table_by_identity(
        &self,
        identity: &TableIdentity,
    ) -> Result<Table, AclError> {
        info!("Fetching table");

        match self.cache().get_table(identity).await {
            Ok(Some(table)) => {
                debug!(check_seq = table.check_seq, "Table served from cache");
                return Ok(table);
            }
            Ok(None) => debug!("Cache miss"),
            Err(e) => warn!(error = %e, "Cache lookup failed, treating as miss"),
        }

        let checks = self.fetch_and_cache_all_checks().await?;
        match projector::find_match(&checks, identity) {
            Some(table) => {
                debug!(check_seq = table.check_seq, "Table found in open checks");
                Ok(table)
            }
            None => {
                debug!(checks = checks.len(), "No open check at this table");
                Err(AclError::NotFound)
            }
        }
    }

    /// Fetches every open check and refills the cache with their projections.
    ///
    /// Concurrent callers share one upstream call and receive the same snapshot.
    /// Used by both the read path and the [`Refresher`](super::Refresher).
    #[instrument(skip(self))]
    pub async fn fetch_and_cache_all_checks(&self) -> Result<OpenChecks, AclError> {
        let leader = self.clone();
        let outcome = self
            .flights
            .run(ALL_CHECKS_KEY, async move { leader.load_open_checks().await })
            .await
            .map_err(|e| AclError::Coalescer(e.to_string()))?;

        debug!(shared = outcome.shared, "Open checks fetch finished");
        outcome
            .into_result()
            .inspect_err(|e| warn!(error = %e, "Fetching open checks failed"))
    }

    /// Body of a flight. Only the leader of a flight runs this.
    async fn load_open_checks(&self) -> Result<OpenChecks, AclError> {
        let response = self
            .call_upstream(self.api.open_checks_with_seats())
            .await?;

        let checks = match response.checks {
            Some(checks) if !checks.is_empty() => checks,
            _ => {
                warn!("Upstream returned no open checks");
                return Err(AclError::NotFound);
            }
        };
        debug!(checks = checks.len(), "Open checks received");

        let tables = projector::project_all(&checks);
        let seated = tables.len();
        match self.cache().add_tables(tables).await {
            Ok(()) => debug!(seated, "Cache refilled"),
            Err(e) => warn!(error = %e, "Cache refill failed"),
        }

        Ok(Arc::new(checks))
    }
}
