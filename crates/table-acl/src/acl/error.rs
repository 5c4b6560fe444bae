//! Error types for the adapter.

use crate::clients::UpstreamError;
use thiserror::Error;

/// Everything the adapter can report to its callers.
///
/// `Clone` because one coalesced failure is delivered to every waiter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AclError {
    /// No table matched, or the upstream returned no check data at all.
    #[error("not found")]
    NotFound,

    /// The order id is not an integer.
    #[error("illegal order id {order_id:?}: {reason}")]
    InvalidOrderId { order_id: String, reason: String },

    /// The order id is an integer outside the upstream's 32-bit range.
    #[error("order id {0} out of int32 range")]
    OrderIdOutOfRange(i64),

    /// Transport, protocol or remote failure, unchanged.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The operation is intentionally not supported by this backend.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// The coalescer stopped or its leader task died.
    #[error("coalescer error: {0}")]
    Coalescer(String),
}

impl AclError {
    /// `true` for failures detected before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AclError::InvalidOrderId { .. } | AclError::OrderIdOutOfRange(_)
        )
    }
}
