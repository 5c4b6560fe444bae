//! Pure data structures: the domain side ([`Table`], [`TableIdentity`]) and the
//! upstream side ([`RawCheck`], [`AddToCheckRequest`]).

pub mod check;
pub mod payment;
pub mod table;

pub use check::*;
pub use payment::*;
pub use table::*;
