//! Tables as callers see them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The four-part key of a physical table.
///
/// Values are compared verbatim: no trimming or case folding happens anywhere
/// in this crate, so callers must normalize before building an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentity {
    pub revenue_center: String,
    pub floor: String,
    pub section: String,
    pub table_id: String,
}

impl TableIdentity {
    pub fn new(
        revenue_center: impl Into<String>,
        floor: impl Into<String>,
        section: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            revenue_center: revenue_center.into(),
            floor: floor.into(),
            section: section.into(),
            table_id: table_id.into(),
        }
    }
}

impl Display for TableIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.revenue_center, self.floor, self.section, self.table_id
        )
    }
}

/// A table with the open check currently seated at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub identity: TableIdentity,
    /// Upstream check sequence; this is the order id payments are applied to.
    pub check_seq: i32,
    pub check_num: i32,
    pub check_id: String,
    pub check_name: String,
    pub guest_count: i32,
    pub seat_count: usize,
    pub total_due: String,
    pub opened_at: Option<String>,
}

impl Table {
    /// Exact, field-by-field identity comparison.
    pub fn matches(&self, identity: &TableIdentity) -> bool {
        self.identity.revenue_center == identity.revenue_center
            && self.identity.floor == identity.floor
            && self.identity.section == identity.section
            && self.identity.table_id == identity.table_id
    }

    /// The order id callers pass back to `apply_payment`.
    pub fn order_id(&self) -> String {
        self.check_seq.to_string()
    }
}
