use crate::acl::DEFAULT_BUFFER_SIZE;
use std::{env, time::Duration};

/// Default deadline for a single upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AclConfig {
    /// Employee id number sent with payments (default: empty)
    pub credential: String,
    /// Cache refill period; `None` disables the refresher (default: none)
    pub refill_interval: Option<Duration>,
    /// Deadline per upstream call; `None` waits indefinitely (default: 30s)
    pub upstream_timeout: Option<Duration>,
    /// In-memory cache capacity; `None` disables caching (default: none)
    pub cache_max_entries: Option<usize>,
    /// In-memory cache entry lifetime; `None` never expires (default: none)
    pub cache_ttl: Option<Duration>,
    /// Coalescer mailbox capacity (default: 32)
    pub buffer_size: usize,
}

impl AclConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `POS_EMPLOYEE_ID` - credential attached to payments
    /// - `POS_REFILL_INTERVAL_SECS` - refresher period, unset or 0 to disable
    /// - `POS_UPSTREAM_TIMEOUT_SECS` - upstream deadline, 0 to disable (default: 30)
    /// - `POS_CACHE_MAX_ENTRIES` - enables the in-memory cache with this capacity
    /// - `POS_CACHE_TTL_SECS` - in-memory cache entry lifetime
    /// - `POS_BUFFER_SIZE` - coalescer mailbox capacity (default: 32)
    pub fn from_env() -> Self {
        Self {
            credential: env::var("POS_EMPLOYEE_ID").unwrap_or_default(),
            refill_interval: secs_var("POS_REFILL_INTERVAL_SECS").filter(|d| !d.is_zero()),
            upstream_timeout: match secs_var("POS_UPSTREAM_TIMEOUT_SECS") {
                Some(d) if d.is_zero() => None,
                Some(d) => Some(d),
                None => Some(DEFAULT_UPSTREAM_TIMEOUT),
            },
            cache_max_entries: parsed_var("POS_CACHE_MAX_ENTRIES").filter(|n| *n > 0),
            cache_ttl: secs_var("POS_CACHE_TTL_SECS").filter(|d| !d.is_zero()),
            buffer_size: parsed_var("POS_BUFFER_SIZE")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_BUFFER_SIZE),
        }
    }
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            credential: String::new(),
            refill_interval: None,
            upstream_timeout: Some(DEFAULT_UPSTREAM_TIMEOUT),
            cache_max_entries: None,
            cache_ttl: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn secs_var(name: &str) -> Option<Duration> {
    parsed_var::<u64>(name).map(Duration::from_secs)
}
