//! # Cache Refresher
//!
//! Keeps the table cache warm by re-running the all-checks fetch on a fixed
//! interval. A refresh that overlaps a user lookup joins the same flight, so the
//! refresher never adds upstream load on top of a cold read.

use super::TableAcl;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, info_span, warn, Instrument};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct Refresher {
    acl: TableAcl,
    interval: Duration,
}

impl Refresher {
    /// A zero interval is raised to one millisecond.
    pub fn new(acl: TableAcl, interval: Duration) -> Self {
        Self {
            acl,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Ticks forever. The first refresh fires immediately.
    ///
    /// Each tick spawns its fetch and moves on without waiting, so a slow
    /// upstream never delays the schedule. While the previous refresh is still
    /// pending the tick is skipped, which keeps a hung upstream from piling up
    /// waiters. Failures are logged and dropped.
    pub async fn run(self) {
        info!(interval = ?self.interval, "Refresher started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pending: Option<JoinHandle<()>> = None;
        let mut tick: u64 = 0;
        loop {
            ticker.tick().await;
            tick += 1;

            if pending.as_ref().is_some_and(|refresh| !refresh.is_finished()) {
                debug!(tick, "Previous refresh still pending, skipping tick");
                continue;
            }

            let acl = self.acl.clone();
            pending = Some(tokio::spawn(
                async move {
                    match acl.fetch_and_cache_all_checks().await {
                        Ok(checks) => debug!(checks = checks.len(), "Cache refreshed"),
                        Err(e) => warn!(error = %e, "Cache refresh failed"),
                    }
                }
                .instrument(info_span!("refresh", tick)),
            ));
        }
    }
}

impl TableAcl {
    /// Starts a [`Refresher`] in the background. Abort the handle to stop it.
    ///
    /// The refresher shares this adapter's settings, so a cache set later with
    /// [`set_cache`](TableAcl::set_cache) is the one it fills.
    pub fn autofill_cache(&self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(Refresher::new(self.clone(), interval).run())
    }
}
