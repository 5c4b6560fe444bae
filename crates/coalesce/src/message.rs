//! # Flight Messages
//!
//! This module defines the message types exchanged between the
//! [`FlightClient`](crate::FlightClient) and the [`FlightActor`](crate::FlightActor).

use crate::error::FlightError;
use std::fmt::{self, Debug};
use std::future::Future;
use std::pin::Pin;
use tokio::sync::oneshot;

/// A boxed, not-yet-started unit of work.
///
/// Futures are lazy, so an operation that loses the race for its key is dropped
/// without ever being polled: the upstream call it wraps never happens.
pub type Operation<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Type alias for the one-shot channel a waiter receives its copy on.
pub type Response<T, E> = oneshot::Sender<Result<Outcome<T, E>, FlightError>>;

/// What every caller of a flight receives.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T, E> {
    /// The leader's result, cloned for each waiter.
    pub result: Result<T, E>,
    /// `true` when more than one caller received this result.
    pub shared: bool,
}

impl<T, E> Outcome<T, E> {
    /// Unwraps the shared flag, keeping only the operation's result.
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Request sent to the coalescer.
///
/// There is a single variant today; the enum keeps the mailbox open for
/// control messages without changing the client signature.
pub enum FlightRequest<K, T, E> {
    Run {
        key: K,
        operation: Operation<T, E>,
        respond_to: Response<T, E>,
    },
}

impl<K: Debug, T, E> Debug for FlightRequest<K, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightRequest::Run { key, .. } => f.debug_struct("Run").field("key", key).finish(),
        }
    }
}

/// Completion notice a leader task posts back to the actor.
pub(crate) struct Landed<K, T, E> {
    pub(crate) key: K,
    pub(crate) result: Result<Result<T, E>, FlightError>,
}
