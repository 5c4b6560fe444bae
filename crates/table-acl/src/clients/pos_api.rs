//! # Point-of-Sale RPC Boundary
//!
//! The adapter never speaks the wire protocol itself. It consumes a [`PosApi`]
//! implementation that turns typed requests into remote calls and back.

use crate::model::{AddToCheckRequest, OpenChecksResponse};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failures reported by the RPC client, passed to callers unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request never made it, or the connection dropped.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The backend answered with a fault.
    #[error("Remote fault {code}: {message}")]
    Remote { code: String, message: String },

    /// The call did not finish within its deadline.
    #[error("Upstream call timed out after {0:?}")]
    Timeout(Duration),
}

/// The two remote procedures the adapter relies on.
#[async_trait]
pub trait PosApi: Send + Sync {
    /// Lists every open check, with seats, across the whole property.
    async fn open_checks_with_seats(&self) -> Result<OpenChecksResponse, UpstreamError>;

    /// Adds a tender line to an existing check.
    async fn add_to_existing_check(&self, request: AddToCheckRequest) -> Result<(), UpstreamError>;
}
