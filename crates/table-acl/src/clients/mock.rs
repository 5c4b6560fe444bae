//! # Scripted Point-of-Sale Backend
//!
//! `MockPosApi` stands in for the RPC client in tests and in the demo binary.
//! Responses come from a queue of expectations; once the queue for a call is
//! drained, a sticky response set with `serve_open_checks` is used instead.
//!
//! ```rust
//! use table_acl::clients::{MockPosApi, PosApi, UpstreamError};
//! use table_acl::model::RawCheck;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockPosApi::new();
//!     mock.expect_open_checks()
//!         .return_err(UpstreamError::Transport("reset".into()));
//!     mock.serve_open_checks(vec![RawCheck::default()]);
//!
//!     assert!(mock.open_checks_with_seats().await.is_err());
//!     assert!(mock.open_checks_with_seats().await.is_ok());
//!     assert_eq!(mock.open_checks_calls(), 2);
//! }
//! ```

use crate::clients::{PosApi, UpstreamError};
use crate::model::{AddToCheckRequest, OpenChecksResponse, RawCheck};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type OpenChecksReply = Result<OpenChecksResponse, UpstreamError>;
type PaymentReply = Result<(), UpstreamError>;

#[derive(Default)]
struct Script {
    open_checks: VecDeque<OpenChecksReply>,
    sticky_open_checks: Option<OpenChecksReply>,
    payments: VecDeque<PaymentReply>,
}

/// A [`PosApi`] answering from scripted expectations.
#[derive(Clone, Default)]
pub struct MockPosApi {
    script: Arc<Mutex<Script>>,
    latency: Arc<Mutex<Option<Duration>>>,
    open_checks_calls: Arc<AtomicUsize>,
    payment_requests: Arc<Mutex<Vec<AddToCheckRequest>>>,
}

impl MockPosApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every call, to widen the window in which callers overlap.
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock().unwrap() = Some(latency);
        self
    }

    /// Queues one reply for `open_checks_with_seats`.
    pub fn expect_open_checks(&self) -> OpenChecksExpectationBuilder {
        OpenChecksExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Answers every unscripted `open_checks_with_seats` call with `checks`.
    pub fn serve_open_checks(&self, checks: Vec<RawCheck>) {
        self.script.lock().unwrap().sticky_open_checks =
            Some(Ok(OpenChecksResponse::with_checks(checks)));
    }

    /// Queues one reply for `add_to_existing_check`.
    pub fn expect_payment(&self) -> PaymentExpectationBuilder {
        PaymentExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Number of `open_checks_with_seats` calls received.
    pub fn open_checks_calls(&self) -> usize {
        self.open_checks_calls.load(Ordering::SeqCst)
    }

    /// Every payment request received, in order.
    pub fn payment_requests(&self) -> Vec<AddToCheckRequest> {
        self.payment_requests.lock().unwrap().clone()
    }

    /// Verifies that all queued expectations were consumed.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        let remaining = script.open_checks.len() + script.payments.len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PosApi for MockPosApi {
    async fn open_checks_with_seats(&self) -> Result<OpenChecksResponse, UpstreamError> {
        self.open_checks_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut script = self.script.lock().unwrap();
        if let Some(reply) = script.open_checks.pop_front() {
            return reply;
        }
        match &script.sticky_open_checks {
            Some(reply) => reply.clone(),
            None => panic!("Unexpected open_checks_with_seats call"),
        }
    }

    async fn add_to_existing_check(&self, request: AddToCheckRequest) -> Result<(), UpstreamError> {
        self.payment_requests.lock().unwrap().push(request);
        self.simulate_latency().await;

        let reply = self.script.lock().unwrap().payments.pop_front();
        match reply {
            Some(reply) => reply,
            None => panic!("Unexpected add_to_existing_check call"),
        }
    }
}

/// Builder for `open_checks_with_seats` expectations.
pub struct OpenChecksExpectationBuilder {
    script: Arc<Mutex<Script>>,
}

impl OpenChecksExpectationBuilder {
    pub fn return_ok(self, checks: Vec<RawCheck>) {
        self.return_response(OpenChecksResponse::with_checks(checks));
    }

    /// Replies with an arbitrary response, e.g. one without a check array.
    pub fn return_response(self, response: OpenChecksResponse) {
        self.script.lock().unwrap().open_checks.push_back(Ok(response));
    }

    pub fn return_err(self, error: UpstreamError) {
        self.script.lock().unwrap().open_checks.push_back(Err(error));
    }
}

/// Builder for `add_to_existing_check` expectations.
pub struct PaymentExpectationBuilder {
    script: Arc<Mutex<Script>>,
}

impl PaymentExpectationBuilder {
    pub fn return_ok(self) {
        self.script.lock().unwrap().payments.push_back(Ok(()));
    }

    pub fn return_err(self, error: UpstreamError) {
        self.script.lock().unwrap().payments.push_back(Err(error));
    }
}
