//! Downtime event entity module
//!
//! Records an interval where a machine was not producing, with a reason
//! code. The analytics engine treats {"setup", "maintenance"} reasons as
//! planned and excludes them from unplanned downtime (spec.md §4.9).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DowntimeEvent {
    pub machine_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason: String,
}

impl DowntimeEvent {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }

    /// {"setup", "maintenance"} are planned reasons; everything else counts
    /// toward unplanned downtime for availability calculations.
    pub fn is_unplanned(&self) -> bool {
        !matches!(self.reason.as_str(), "setup" | "maintenance")
    }
}
