use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::item::{Item, StatusId};

/// The API never returns more than this many posts for an account, however
/// it is paginated. Anything older is only reachable through an export.
pub const API_CEILING: usize = 3200;

/// Posts/reposts allowed to survive a run. Kept below [`API_CEILING`] so the
/// account never again accumulates more than the API can list.
pub const HARD_CAP: usize = API_CEILING - 100;

/// Keep/delete rule for a single item.
#[derive(Debug, Clone, Default)]
pub struct RetentionPolicy {
    keep_days: i64,
    keep_ids: HashSet<StatusId>,
}

impl RetentionPolicy {
    pub fn new(keep_days: u32, keep_ids: impl IntoIterator<Item = StatusId>) -> Self {
        Self {
            keep_days: i64::from(keep_days),
            keep_ids: keep_ids.into_iter().collect(),
        }
    }

    /// Age in calendar days between the item's creation and `now`.
    pub fn age_days(item: &Item, now: NaiveDateTime) -> i64 {
        (now.date() - item.created_at().date()).num_days()
    }

    /// Items at most `keep_days` old are kept; older ones are deleted unless
    /// pinned in `keep_ids`.
    pub fn should_delete(&self, item: &Item, now: NaiveDateTime) -> bool {
        if Self::age_days(item, now) <= self.keep_days {
            return false;
        }

        !self.keep_ids.contains(&item.id())
    }

    pub fn is_pinned(&self, id: StatusId) -> bool {
        self.keep_ids.contains(&id)
    }
}
