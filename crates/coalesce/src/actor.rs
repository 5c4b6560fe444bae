//! # Coalescing Actor
//!
//! This module defines the `FlightActor`, the component that owns the table of
//! in-flight operations. It follows the usual actor shape: all mutable state
//! lives inside one task and is only touched while processing a message, so the
//! in-flight table needs no lock.

use crate::client::FlightClient;
use crate::error::FlightError;
use crate::message::{FlightRequest, Landed, Operation, Outcome, Response};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that deduplicates concurrent operations sharing a key.
///
/// # Concurrency Model
///
/// * The first `Run` request for a key becomes the **leader**: its operation is
///   spawned on its own task and the key is marked in flight.
/// * Every `Run` for the same key that arrives before the leader lands becomes a
///   **waiter**. Its operation is dropped unpolled.
/// * When the leader lands, the key is removed from the table and every waiter
///   (leader included) receives a clone of the result.
///
/// The operation runs detached from the caller that supplied it. A caller that
/// gives up (drops its future) only drops its own response channel; the flight
/// carries on and the remaining waiters still get the result.
///
/// ```rust
/// use coalesce::FlightActor;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = FlightActor::<&'static str, u32, String>::new(8);
///     tokio::spawn(actor.run());
///
///     let outcome = client.run("answer", async { Ok(42) }).await.unwrap();
///     assert_eq!(outcome.result, Ok(42));
///     assert!(!outcome.shared);
/// }
/// ```
pub struct FlightActor<K, T, E> {
    receiver: mpsc::Receiver<FlightRequest<K, T, E>>,
    landed_tx: mpsc::UnboundedSender<Landed<K, T, E>>,
    landed_rx: mpsc::UnboundedReceiver<Landed<K, T, E>>,
    in_flight: HashMap<K, Vec<Response<T, E>>>,
}

impl<K, T, E> FlightActor<K, T, E>
where
    K: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a new `FlightActor` and its associated `FlightClient`.
    ///
    /// `buffer_size` bounds the request mailbox; callers wait for space when
    /// it is full.
    pub fn new(buffer_size: usize) -> (Self, FlightClient<K, T, E>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (landed_tx, landed_rx) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            landed_tx,
            landed_rx,
            in_flight: HashMap::new(),
        };
        (actor, FlightClient::new(sender))
    }

    /// Runs the actor's event loop.
    ///
    /// The loop stops accepting work once every client is dropped, then keeps
    /// going until the flights still in the air have landed.
    pub async fn run(mut self) {
        info!("Coalescer started");
        let mut accepting = true;

        loop {
            if !accepting && self.in_flight.is_empty() {
                break;
            }

            tokio::select! {
                msg = self.receiver.recv(), if accepting => match msg {
                    Some(FlightRequest::Run { key, operation, respond_to }) => {
                        self.take_off(key, operation, respond_to);
                    }
                    None => {
                        debug!(in_flight = self.in_flight.len(), "Mailbox closed");
                        accepting = false;
                    }
                },
                Some(landed) = self.landed_rx.recv() => self.land(landed),
            }
        }

        info!("Shutdown");
    }

    fn take_off(&mut self, key: K, operation: Operation<T, E>, respond_to: Response<T, E>) {
        if let Some(waiters) = self.in_flight.get_mut(&key) {
            waiters.push(respond_to);
            debug!(%key, waiters = waiters.len(), "Joined in-flight call");
            return;
        }

        debug!(%key, "Leading new call");
        self.in_flight.insert(key.clone(), vec![respond_to]);

        let landed = self.landed_tx.clone();
        tokio::spawn(async move {
            // The inner spawn isolates a panicking operation so the key is
            // always released.
            let result = tokio::spawn(operation)
                .await
                .map_err(|e| FlightError::Aborted(e.to_string()));
            let _ = landed.send(Landed { key, result });
        });
    }

    fn land(&mut self, landed: Landed<K, T, E>) {
        let Landed { key, result } = landed;
        let Some(waiters) = self.in_flight.remove(&key) else {
            warn!(%key, "Landed call had no waiters");
            return;
        };

        let shared = waiters.len() > 1;
        match &result {
            Ok(Ok(_)) => info!(%key, waiters = waiters.len(), "Call landed"),
            Ok(Err(_)) => warn!(%key, waiters = waiters.len(), "Call failed"),
            Err(e) => warn!(%key, waiters = waiters.len(), error = %e, "Call aborted"),
        }

        for respond_to in waiters {
            let copy = result.clone().map(|result| Outcome { result, shared });
            // A waiter that went away just misses its copy.
            let _ = respond_to.send(copy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    type Client = FlightClient<&'static str, u32, String>;

    fn start() -> Client {
        let (actor, client) = FlightActor::new(16);
        tokio::spawn(actor.run());
        client
    }

    fn slow_count(
        calls: Arc<AtomicUsize>,
        value: u32,
    ) -> impl std::future::Future<Output = Result<u32, String>> {
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(value)
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_execution() {
        let client = start();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for i in 0..8 {
            let client = client.clone();
            let op = slow_count(calls.clone(), i);
            handles.push(tokio::spawn(async move { client.run("all", op).await }));
        }

        let mut values = vec![];
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            assert!(outcome.shared);
            values.push(outcome.result.unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Everyone sees the leader's value, not their own.
        assert!(values.iter().all(|v| *v == values[0]));
    }

    #[tokio::test]
    async fn test_key_is_free_after_landing() {
        let client = start();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = client.run("all", slow_count(calls.clone(), 1)).await.unwrap();
        let second = client.run("all", slow_count(calls.clone(), 2)).await.unwrap();

        assert_eq!(first.result, Ok(1));
        assert_eq!(second.result, Ok(2));
        assert!(!first.shared);
        assert!(!second.shared);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_keys_run_independently() {
        let client = start();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            client.run("a", slow_count(calls.clone(), 1)),
            client.run("b", slow_count(calls.clone(), 2)),
        );

        assert_eq!(a.unwrap().result, Ok(1));
        assert_eq!(b.unwrap().result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_is_shared_by_all_waiters() {
        let client = start();
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Err::<u32, _>("upstream down".to_string())
        };

        let (a, b, c) = tokio::join!(
            client.run("all", failing(calls.clone())),
            client.run("all", failing(calls.clone())),
            client.run("all", failing(calls.clone())),
        );

        for outcome in [a, b, c] {
            assert_eq!(outcome.unwrap().result, Err("upstream down".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_leader_does_not_fail_followers() {
        let client = start();
        let calls = Arc::new(AtomicUsize::new(0));

        let leader = {
            let client = client.clone();
            let op = slow_count(calls.clone(), 7);
            tokio::spawn(async move { client.run("all", op).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let follower = {
            let client = client.clone();
            let op = slow_count(calls.clone(), 99);
            tokio::spawn(async move { client.run("all", op).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        leader.abort();

        let outcome = follower.await.unwrap().unwrap();
        assert_eq!(outcome.result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panicking_operation_releases_key() {
        let client = start();

        let result = client
            .run("all", async {
                if true {
                    panic!("boom");
                }
                Ok::<u32, String>(0)
            })
            .await;
        assert!(matches!(result, Err(FlightError::Aborted(_))));

        let retry = client.run("all", async { Ok(5) }).await.unwrap();
        assert_eq!(retry.result, Ok(5));
    }

    #[tokio::test]
    async fn test_actor_stops_after_clients_drop() {
        let (actor, client) = FlightActor::<&'static str, u32, String>::new(4);
        let handle = tokio::spawn(actor.run());

        client.run("all", async { Ok(1) }).await.unwrap();
        drop(client);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("actor did not stop")
            .unwrap();
    }
}
