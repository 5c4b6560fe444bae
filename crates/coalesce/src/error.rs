//! # Coalescer Errors
//!
//! Errors raised by the coalescing runtime itself. They are distinct from the
//! error type of the coalesced operation, which travels untouched inside
//! [`Outcome::result`](crate::Outcome).

/// Errors that can occur within the coalescer.
///
/// `Clone` is required because a single failure is handed to every caller
/// that joined the same flight.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FlightError {
    #[error("Coalescer closed")]
    ActorClosed,
    #[error("Coalescer dropped response channel")]
    ActorDropped,
    /// The leader task panicked or was cancelled before producing a result.
    #[error("Flight aborted: {0}")]
    Aborted(String),
}
