//! Upstream collaborators: the [`PosApi`] capability and a scripted [`MockPosApi`].

pub mod mock;
pub mod pos_api;

pub use mock::*;
pub use pos_api::*;
