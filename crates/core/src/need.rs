//! Volunteer need rules: openness, role aggregation and time labels.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Role id reported for flexible needs, which carry no real role.
pub const FLEXIBLE_ROLE_ID: DbId = -1;

/// Label shown for the flexible role.
pub const FLEXIBLE_ROLE_LABEL: &str = "Flexible";

/// Label used when a role id has no matching option value.
pub const UNKNOWN_ROLE_LABEL: &str = "unknown";

/// Date-time format for time-range labels, e.g. `May 1, 2030 9:00 AM`.
const DATETIME_FORMAT: &str = "%B %-d, %Y %-I:%M %p";

/// Time-only format used for the end of a same-day range.
const TIME_FORMAT: &str = "%-I:%M %p";

/// Assignment statuses. Cancelled assignments do not fill a need.
pub mod assignment_status {
    pub const SCHEDULED: &str = "scheduled";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

/// Returns `true` if a need can still take volunteers.
///
/// A need is open when it has a start time (flexible needs have none), the
/// start is after `now`, and fewer volunteers are assigned than requested.
/// A need with no quantity is never open.
pub fn is_open_need(
    start_time: Option<Timestamp>,
    quantity: Option<i32>,
    quantity_assigned: i64,
    now: Timestamp,
) -> bool {
    let Some(start) = start_time else {
        return false;
    };
    let Some(quantity) = quantity else {
        return false;
    };
    i64::from(quantity) > quantity_assigned && start > now
}

/// Role key a need contributes to a project's role list.
///
/// Flexible needs share [`FLEXIBLE_ROLE_ID`]; other needs contribute their
/// own role id, or nothing when they have none.
pub fn role_key(is_flexible: bool, role_id: Option<DbId>) -> Option<DbId> {
    if is_flexible {
        Some(FLEXIBLE_ROLE_ID)
    } else {
        role_id
    }
}

/// A role present on a project, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleLabel {
    pub role_id: DbId,
    pub label: String,
}

/// Turn a role-id → label map into a list sorted by label.
///
/// The map already dedupes by role id. Ties on label are broken by role id so
/// the order is stable.
pub fn sort_roles(roles: BTreeMap<DbId, String>) -> Vec<RoleLabel> {
    let mut list: Vec<RoleLabel> = roles
        .into_iter()
        .map(|(role_id, label)| RoleLabel { role_id, label })
        .collect();
    list.sort_by(|a, b| a.label.cmp(&b.label).then(a.role_id.cmp(&b.role_id)));
    list
}

/// Human-readable label for a need's time window.
///
/// Without a duration only the start is shown. A range that ends on the same
/// day shows the end as a time only.
pub fn format_time_range(start: Timestamp, duration_minutes: Option<i32>) -> String {
    let start_label = start.format(DATETIME_FORMAT).to_string();
    let Some(minutes) = duration_minutes.filter(|m| *m > 0) else {
        return start_label;
    };

    let end = start + Duration::minutes(i64::from(minutes));
    let end_format = if end.date_naive() == start.date_naive() {
        TIME_FORMAT
    } else {
        DATETIME_FORMAT
    };
    format!("{start_label} - {}", end.format(end_format))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    // -----------------------------------------------------------------------
    // is_open_need
    // -----------------------------------------------------------------------

    #[test]
    fn future_unfilled_need_is_open() {
        let now = at(2030, 1, 1, 0, 0);
        assert!(is_open_need(Some(at(2030, 2, 1, 9, 0)), Some(5), 2, now));
    }

    #[test]
    fn filled_need_is_not_open() {
        let now = at(2030, 1, 1, 0, 0);
        assert!(!is_open_need(Some(at(2030, 2, 1, 9, 0)), Some(1), 1, now));
    }

    #[test]
    fn past_need_is_never_open() {
        let now = at(2030, 1, 1, 0, 0);
        assert!(!is_open_need(Some(at(2029, 12, 31, 9, 0)), Some(100), 0, now));
    }

    #[test]
    fn need_without_start_or_quantity_is_not_open() {
        let now = at(2030, 1, 1, 0, 0);
        assert!(!is_open_need(None, Some(5), 0, now));
        assert!(!is_open_need(Some(at(2030, 2, 1, 9, 0)), None, 0, now));
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    #[test]
    fn flexible_needs_share_one_role_key() {
        assert_eq!(role_key(true, Some(7)), Some(FLEXIBLE_ROLE_ID));
        assert_eq!(role_key(true, None), Some(FLEXIBLE_ROLE_ID));
        assert_eq!(role_key(false, Some(7)), Some(7));
        assert_eq!(role_key(false, None), None);
    }

    #[test]
    fn roles_sorted_by_label() {
        let mut map = BTreeMap::new();
        map.insert(3, "Usher".to_string());
        map.insert(FLEXIBLE_ROLE_ID, FLEXIBLE_ROLE_LABEL.to_string());
        map.insert(1, "Greeter".to_string());

        let labels: Vec<_> = sort_roles(map).into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Flexible", "Greeter", "Usher"]);
    }

    // -----------------------------------------------------------------------
    // Time labels
    // -----------------------------------------------------------------------

    #[test]
    fn same_day_range_shows_end_time_only() {
        let label = format_time_range(at(2030, 5, 1, 9, 0), Some(90));
        assert_eq!(label, "May 1, 2030 9:00 AM - 10:30 AM");
    }

    #[test]
    fn overnight_range_shows_full_end() {
        let label = format_time_range(at(2030, 5, 1, 22, 0), Some(180));
        assert_eq!(label, "May 1, 2030 10:00 PM - May 2, 2030 1:00 AM");
    }

    #[test]
    fn no_duration_shows_start_only() {
        assert_eq!(format_time_range(at(2030, 5, 1, 9, 5), None), "May 1, 2030 9:05 AM");
        assert_eq!(format_time_range(at(2030, 5, 1, 9, 5), Some(0)), "May 1, 2030 9:05 AM");
    }
}
