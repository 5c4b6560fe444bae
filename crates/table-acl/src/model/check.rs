//! Upstream check shapes, as delivered by the point-of-sale RPC client.
//!
//! Only the fields the projector reads are modelled; the transport decodes
//! everything else away.

use serde::{Deserialize, Serialize};

/// One seat on an open check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSeat {
    pub seat_num: i32,
    pub guest_name: Option<String>,
}

/// An open check with its seats.
///
/// A check that has not been seated carries a zero `table_object_num`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCheck {
    pub check_seq: i32,
    pub check_num: i32,
    pub check_id: String,
    pub check_name: String,
    pub revenue_center_id: i32,
    pub table_object_num: i32,
    pub floor: Option<String>,
    pub section: Option<String>,
    pub guest_count: i32,
    pub total_due: String,
    pub open_time: Option<String>,
    pub seats: Vec<RawSeat>,
}

/// Response to the "open checks with seats" call.
///
/// `checks` is `None` when the upstream omitted the array entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenChecksResponse {
    pub checks: Option<Vec<RawCheck>>,
}

impl OpenChecksResponse {
    pub fn with_checks(checks: Vec<RawCheck>) -> Self {
        Self {
            checks: Some(checks),
        }
    }
}
