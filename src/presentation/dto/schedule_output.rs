//! Schedule output DTO module
//!
//! Flattens a `SchedulingResult` into a report-friendly shape: slots grouped
//! for display, buckets as-is, and conflicts summarized by severity so a CLI
//! or REST caller doesn't need to recount them.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::SchedulingResult;
use crate::domain::entities::{CapacityBucket, ConflictSeverity, ScheduleSlot, SchedulingConflict};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub summary: ScheduleSummaryOutput,
    pub slots: Vec<ScheduleSlot>,
    pub buckets: Vec<CapacityBucket>,
    pub conflicts: Vec<SchedulingConflict>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummaryOutput {
    pub total_slots: usize,
    pub total_conflicts: usize,
    pub critical_conflicts: usize,
    pub overloaded_buckets: usize,
}

impl ScheduleOutput {
    pub fn from_result(result: SchedulingResult) -> Self {
        let critical_conflicts = result
            .conflicts
            .iter()
            .filter(|c| c.severity == ConflictSeverity::Critical)
            .count();
        let overloaded_buckets = result.buckets.iter().filter(|b| b.is_overloaded()).count();

        let summary = ScheduleSummaryOutput {
            total_slots: result.slots.len(),
            total_conflicts: result.conflicts.len(),
            critical_conflicts,
            overloaded_buckets,
        };

        Self {
            summary,
            slots: result.slots,
            buckets: result.buckets,
            conflicts: result.conflicts,
        }
    }
}
