//! # Mock Coalescer
//!
//! `MockFlightClient` hands out a real [`FlightClient`] whose requests are answered
//! by a scripted task instead of a [`FlightActor`](crate::FlightActor). Use it to test
//! code that *drives* a coalescer (which key it uses, how it handles a shared
//! error) without depending on timing.
//!
//! | Feature | MockFlightClient | Real FlightActor |
//! |---------|------------------|------------------|
//! | **Determinism** | Scripted, one expectation per request | Subject to scheduler |
//! | **Operation** | Dropped, or executed with `execute()` | Executed by the leader |
//! | **Error Injection** | `return_err` / `return_aborted` | Requires a failing operation |
//!
//! ```rust
//! use coalesce::mock::MockFlightClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockFlightClient::<&'static str, u32, String>::new();
//!     mock.expect_run("all").return_ok(3);
//!
//!     let client = mock.client();
//!     let outcome = client.run("all", async { Ok(0) }).await.unwrap();
//!     assert_eq!(outcome.result, Ok(3));
//!
//!     mock.verify();
//! }
//! ```

use crate::error::FlightError;
use crate::message::{FlightRequest, Outcome};
use crate::FlightClient;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// How an expected request is answered.
enum Reply<T, E> {
    Fixed(Result<Outcome<T, E>, FlightError>),
    Execute,
}

struct Expectation<K, T, E> {
    key: K,
    reply: Reply<T, E>,
}

type Expectations<K, T, E> = Arc<Mutex<VecDeque<Expectation<K, T, E>>>>;

/// A flight client with expectation tracking.
pub struct MockFlightClient<K, T, E> {
    client: FlightClient<K, T, E>,
    expectations: Expectations<K, T, E>,
    keys: Arc<Mutex<Vec<K>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<K, T, E> MockFlightClient<K, T, E>
where
    K: PartialEq + Debug + Clone + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<FlightRequest<K, T, E>>(100);
        let expectations: Expectations<K, T, E> = Arc::new(Mutex::new(VecDeque::new()));
        let keys = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let keys_clone = keys.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let FlightRequest::Run {
                    key,
                    operation,
                    respond_to,
                } = request;

                keys_clone.lock().unwrap().push(key.clone());
                let expectation = expectations_clone.lock().unwrap().pop_front();

                let Some(expectation) = expectation else {
                    panic!("Unexpected run for key {key:?}");
                };
                assert_eq!(expectation.key, key, "Run issued with an unexpected key");

                match expectation.reply {
                    Reply::Fixed(response) => {
                        let _ = respond_to.send(response);
                    }
                    Reply::Execute => {
                        let result = operation.await;
                        let _ = respond_to.send(Ok(Outcome {
                            result,
                            shared: false,
                        }));
                    }
                }
            }
        });

        Self {
            client: FlightClient::new(sender),
            expectations,
            keys,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> FlightClient<K, T, E> {
        self.client.clone()
    }

    /// Expects a `run` for `key`.
    pub fn expect_run(&mut self, key: K) -> RunExpectationBuilder<K, T, E> {
        RunExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Keys of every request received so far, in arrival order.
    pub fn keys(&self) -> Vec<K> {
        self.keys.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<K, T, E> Default for MockFlightClient<K, T, E>
where
    K: PartialEq + Debug + Clone + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `run` expectations.
pub struct RunExpectationBuilder<K, T, E> {
    key: K,
    expectations: Expectations<K, T, E>,
}

impl<K, T, E> RunExpectationBuilder<K, T, E> {
    fn push(self, reply: Reply<T, E>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            key: self.key,
            reply,
        });
    }

    /// Answers with a successful, unshared result. The operation is dropped.
    pub fn return_ok(self, value: T) {
        self.push(Reply::Fixed(Ok(Outcome {
            result: Ok(value),
            shared: false,
        })));
    }

    /// Answers with a failed, unshared result. The operation is dropped.
    pub fn return_err(self, error: E) {
        self.push(Reply::Fixed(Ok(Outcome {
            result: Err(error),
            shared: false,
        })));
    }

    /// Answers with a coalescer-level failure.
    pub fn return_aborted(self, error: FlightError) {
        self.push(Reply::Fixed(Err(error)));
    }

    /// Runs the submitted operation and answers with its result.
    pub fn execute(self) {
        self.push(Reply::Execute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_fixed_reply_drops_operation() {
        let mut mock = MockFlightClient::<&'static str, u32, String>::new();
        mock.expect_run("all").return_err("nope".to_string());

        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let outcome = mock
            .client()
            .run("all", async move {
                flag.store(true, Ordering::SeqCst);
                Ok(1)
            })
            .await
            .unwrap();

        assert_eq!(outcome.result, Err("nope".to_string()));
        assert!(!polled.load(Ordering::SeqCst));
        mock.verify();
    }

    #[tokio::test]
    async fn test_execute_runs_operation() {
        let mut mock = MockFlightClient::<&'static str, u32, String>::new();
        mock.expect_run("all").execute();
        mock.expect_run("all")
            .return_aborted(FlightError::Aborted("gone".to_string()));

        let client = mock.client();
        let outcome = client.run("all", async { Ok(11) }).await.unwrap();
        assert_eq!(outcome.result, Ok(11));

        let aborted = client.run("all", async { Ok(12) }).await;
        assert_eq!(aborted, Err(FlightError::Aborted("gone".to_string())));

        assert_eq!(mock.keys(), vec!["all", "all"]);
        mock.verify();
    }
}
