//! Schedule slot entity module
//!
//! A ScheduleSlot is the scheduler's unit of output: one operation bound to
//! one machine over one time window, carrying the setup/run split and any
//! conflicts raised against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scheduling_policy::DispatchRule;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSlot {
    pub id: String,
    pub plan_id: String,
    pub work_order_id: String,
    pub operation_id: String,
    pub machine_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub setup_minutes: i64,
    pub run_minutes: i64,
    pub quantity: u32,
    pub priority_score: f64,
    pub rule_used: DispatchRule,
    pub status: SlotStatus,
    pub conflicts: Vec<String>,
    pub locked: bool,
}

impl ScheduleSlot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        plan_id: String,
        work_order_id: String,
        operation_id: String,
        machine_id: String,
        start: DateTime<Utc>,
        setup_minutes: i64,
        run_minutes: i64,
        quantity: u32,
        priority_score: f64,
        rule_used: DispatchRule,
    ) -> Self {
        let end = start + chrono::Duration::minutes(setup_minutes + run_minutes);
        Self {
            id,
            plan_id,
            work_order_id,
            operation_id,
            machine_id,
            start,
            end,
            setup_minutes,
            run_minutes,
            quantity,
            priority_score,
            rule_used,
            status: SlotStatus::Scheduled,
            conflicts: Vec::new(),
            locked: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.status, SlotStatus::Cancelled)
    }

    pub fn overlaps(&self, other: &ScheduleSlot) -> bool {
        self.machine_id == other.machine_id
            && self.is_active()
            && other.is_active()
            && self.start < other.end
            && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.setup_minutes + self.run_minutes
    }
}
