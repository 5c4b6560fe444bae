//! # Coalesce
//!
//! A small single-flight runtime built on the actor model. Many tasks may ask for
//! the same expensive result at once; only one of them actually does the work and
//! everybody else receives a copy of its outcome.
//!
//! ## Architecture Overview
//!
//! 1. **Runtime Layer** ([`FlightActor`]) - owns the table of in-flight keys and
//!    spawns one leader task per key.
//! 2. **Interface Layer** ([`FlightClient`]) - a cloneable handle that submits
//!    operations and waits for the shared [`Outcome`].
//!
//! The in-flight table is touched only by the actor task, so it needs no lock.
//! Leaders run detached from their callers: cancelling a caller never cancels
//! the work other callers are waiting on.
//!
//! ```rust
//! use coalesce::FlightActor;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = FlightActor::<&'static str, usize, String>::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let calls = Arc::new(AtomicUsize::new(0));
//!     let fetch = |calls: Arc<AtomicUsize>| async move {
//!         tokio::time::sleep(Duration::from_millis(20)).await;
//!         Ok(calls.fetch_add(1, Ordering::SeqCst))
//!     };
//!
//!     let (a, b) = tokio::join!(
//!         client.run("all_open_checks", fetch(calls.clone())),
//!         client.run("all_open_checks", fetch(calls.clone())),
//!     );
//!
//!     assert_eq!(a.unwrap().result, b.unwrap().result);
//!     assert_eq!(calls.load(Ordering::SeqCst), 1);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockFlightClient`] answers requests from a queue of expectations so
//! code that drives a coalescer can be tested deterministically.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::FlightActor;
pub use client::FlightClient;
pub use error::FlightError;
pub use message::{FlightRequest, Operation, Outcome, Response};
