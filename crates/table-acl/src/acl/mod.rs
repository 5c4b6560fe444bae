//! # Table Adapter
//!
//! [`TableAcl`] is the stable face of the point-of-sale backend. It answers two
//! questions the rest of the system cares about, "what is seated at this table?"
//! and "apply this payment", and hides everything else the RPC protocol exposes.
//!
//! ## Structure
//!
//! - [`tables`] - cache-aside table lookup over one coalesced "all open checks" call
//! - [`payment`] - order id validation and the payment call
//! - [`refresher`] - background loop keeping the cache warm
//! - [`error`] - [`AclError`]
//!
//! ## Wiring
//!
//! The adapter owns a [`FlightClient`]; the matching [`FlightActor`] must be running
//! for lookups to make progress. [`TableAcl::builder`] returns both halves, the same
//! way an actor factory hands back `(actor, client)`:
//!
//! ```rust
//! use std::sync::Arc;
//! use table_acl::acl::TableAcl;
//! use table_acl::clients::MockPosApi;
//! use table_acl::model::RawCheck;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pos = MockPosApi::new();
//!     pos.serve_open_checks(vec![RawCheck {
//!         check_seq: 5001,
//!         revenue_center_id: 1,
//!         table_object_num: 12,
//!         ..RawCheck::default()
//!     }]);
//!
//!     let (actor, acl) = TableAcl::builder(Arc::new(pos)).build();
//!     tokio::spawn(actor.run());
//!
//!     let table = acl.fetch_table("1", "", "", "12").await.unwrap();
//!     assert_eq!(table.check_seq, 5001);
//! }
//! ```

pub mod error;
pub mod payment;
pub mod refresher;
pub mod tables;

pub use error::*;
pub use payment::parse_check_seq;
pub use refresher::Refresher;

use crate::cache::{NoCache, TableCache};
use crate::clients::{PosApi, UpstreamError};
use crate::model::{RawCheck, Table};
use arc_swap::ArcSwap;
use coalesce::{FlightActor, FlightClient};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Coalescing key of the "list every open check" call. There is one upstream
/// dataset, so one key covers every table lookup and every refresh.
pub const ALL_CHECKS_KEY: &str = "all_open_checks";

/// Default capacity of the coalescer mailbox.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// What one coalesced fetch produces and shares.
pub type OpenChecks = Arc<Vec<RawCheck>>;

pub type ChecksFlightClient = FlightClient<&'static str, OpenChecks, AclError>;
pub type ChecksFlightActor = FlightActor<&'static str, OpenChecks, AclError>;

/// Settings every clone of one [`TableAcl`] reads at call time.
#[derive(Clone)]
struct Settings {
    cache: Arc<dyn TableCache>,
    employee_id_num: String,
    upstream_timeout: Option<Duration>,
}

/// Anti-corruption adapter over the point-of-sale backend.
///
/// Cheap to clone; clones share the upstream client, the coalescer and the
/// settings, so a lookup through any clone joins flights started by any other
/// and a setter called on one clone is seen by all of them, the refresher included.
#[derive(Clone)]
pub struct TableAcl {
    api: Arc<dyn PosApi>,
    flights: ChecksFlightClient,
    settings: Arc<ArcSwap<Settings>>,
}

impl TableAcl {
    /// Wraps an upstream client and a running coalescer. Starts with [`NoCache`],
    /// no credential and no upstream deadline.
    pub fn new(api: Arc<dyn PosApi>, flights: ChecksFlightClient) -> Self {
        let settings = Settings {
            cache: Arc::new(NoCache),
            employee_id_num: String::new(),
            upstream_timeout: None,
        };
        Self {
            api,
            flights,
            settings: Arc::new(ArcSwap::from_pointee(settings)),
        }
    }

    pub fn builder(api: Arc<dyn PosApi>) -> TableAclBuilder {
        TableAclBuilder::new(api)
    }

    /// Replaces the cache for every clone. Flights already in the air keep
    /// writing to the cache they started with.
    pub fn set_cache(&self, cache: Arc<dyn TableCache>) {
        self.update(|settings| settings.cache = cache.clone());
    }

    /// Stores the employee id number sent along with payments.
    pub fn authenticate(&self, credential: impl Into<String>) {
        let credential = credential.into();
        self.update(|settings| settings.employee_id_num = credential.clone());
    }

    /// Deadline applied to every upstream call; `None` waits indefinitely.
    pub fn set_upstream_timeout(&self, timeout: Option<Duration>) {
        self.update(|settings| settings.upstream_timeout = timeout);
    }

    /// Looking orders up by id is not supported by this backend.
    #[instrument(skip(self))]
    pub async fn fetch_order(
        &self,
        order_id: &str,
        tender_media_number: &str,
        revenue_buckets: &str,
        discount_codes: &str,
    ) -> Result<Table, AclError> {
        info!("fetch_order requested");
        Err(AclError::Unimplemented("fetch_order"))
    }

    fn update(&self, apply: impl Fn(&mut Settings)) {
        self.settings.rcu(|current| {
            let mut next = Settings::clone(current);
            apply(&mut next);
            next
        });
    }

    fn cache(&self) -> Arc<dyn TableCache> {
        self.settings.load().cache.clone()
    }

    fn employee_id_num(&self) -> String {
        self.settings.load().employee_id_num.clone()
    }

    async fn call_upstream<T, F>(&self, call: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = Result<T, UpstreamError>>,
    {
        let timeout = self.settings.load().upstream_timeout;
        match timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| UpstreamError::Timeout(limit))?,
            None => call.await,
        }
    }
}

/// Construction-time configuration for [`TableAcl`].
pub struct TableAclBuilder {
    api: Arc<dyn PosApi>,
    cache: Arc<dyn TableCache>,
    credential: String,
    upstream_timeout: Option<Duration>,
    buffer_size: usize,
}

impl TableAclBuilder {
    pub fn new(api: Arc<dyn PosApi>) -> Self {
        Self {
            api,
            cache: Arc::new(NoCache),
            credential: String::new(),
            upstream_timeout: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn cache(mut self, cache: Arc<dyn TableCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    pub fn upstream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Returns the coalescer, which must be `run()`, and the adapter using it.
    pub fn build(self) -> (ChecksFlightActor, TableAcl) {
        let (actor, flights) = FlightActor::new(self.buffer_size);
        let acl = TableAcl::new(self.api, flights);
        acl.set_cache(self.cache);
        acl.authenticate(self.credential);
        acl.set_upstream_timeout(self.upstream_timeout);
        (actor, acl)
    }
}
