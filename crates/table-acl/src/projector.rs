//! Projection of upstream checks into [`Table`] records.
//!
//! Everything here is pure: no I/O and no shared state.

use crate::model::{RawCheck, Table, TableIdentity};
use std::collections::HashSet;

/// Projects a check onto the table it is seated at.
///
/// Returns `None` for checks without a usable location: a non-positive table
/// object number (not seated yet) or a non-positive revenue center. A missing
/// floor or section is read as the empty string.
pub fn project(check: &RawCheck) -> Option<Table> {
    if check.table_object_num <= 0 || check.revenue_center_id <= 0 {
        return None;
    }

    Some(Table {
        identity: TableIdentity {
            revenue_center: check.revenue_center_id.to_string(),
            floor: check.floor.clone().unwrap_or_default(),
            section: check.section.clone().unwrap_or_default(),
            table_id: check.table_object_num.to_string(),
        },
        check_seq: check.check_seq,
        check_num: check.check_num,
        check_id: check.check_id.clone(),
        check_name: check.check_name.clone(),
        guest_count: check.guest_count,
        seat_count: check.seats.len(),
        total_due: check.total_due.clone(),
        opened_at: check.open_time.clone(),
    })
}

/// Projects every check, skipping unseated ones.
///
/// When several checks land on the same identity only the first is kept, so a
/// bulk insert of the result agrees with [`find_match`].
pub fn project_all(checks: &[RawCheck]) -> Vec<Table> {
    let mut seen = HashSet::new();
    checks
        .iter()
        .filter_map(project)
        .filter(|table| seen.insert(table.identity.clone()))
        .collect()
}

/// First check, in upstream order, whose projection matches `identity`.
pub fn find_match(checks: &[RawCheck], identity: &TableIdentity) -> Option<Table> {
    checks
        .iter()
        .filter_map(project)
        .find(|table| table.matches(identity))
}
