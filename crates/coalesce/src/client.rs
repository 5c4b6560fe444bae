//! # Flight Client
//!
//! This module defines the handle callers use to submit operations to a
//! [`FlightActor`](crate::FlightActor).

use crate::error::FlightError;
use crate::message::{FlightRequest, Outcome};
use std::future::Future;
use tokio::sync::{mpsc, oneshot};

/// ## FlightClient
///
/// A cheap, cloneable handle to a running `FlightActor`. It only holds the
/// sender half of the mailbox, so any number of tasks can share one coalescer.
pub struct FlightClient<K, T, E> {
    sender: mpsc::Sender<FlightRequest<K, T, E>>,
}

impl<K, T, E> Clone for FlightClient<K, T, E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<K, T, E> FlightClient<K, T, E> {
    pub fn new(sender: mpsc::Sender<FlightRequest<K, T, E>>) -> Self {
        Self { sender }
    }

    /// Runs `operation` under `key`, or joins the flight already running under it.
    ///
    /// The operation is only polled if this call becomes the leader. Dropping the
    /// returned future stops waiting but does not cancel the flight.
    pub async fn run<F>(&self, key: K, operation: F) -> Result<Outcome<T, E>, FlightError>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FlightRequest::Run {
                key,
                operation: Box::pin(operation),
                respond_to,
            })
            .await
            .map_err(|_| FlightError::ActorClosed)?;
        response.await.map_err(|_| FlightError::ActorDropped)?
    }
}
