//! Utilization breakdown value object module
//!
//! Splits a machine's time in a period into productive, setup, downtime,
//! and idle minutes, and derives MTBF/MTTR from the failure-reason subset
//! of downtime (spec.md §4.9).

use serde::{Deserialize, Serialize};

use super::rounding::{round2, safe_ratio};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UtilizationBreakdown {
    pub productive_minutes: f64,
    pub setup_minutes: f64,
    pub downtime_minutes: f64,
    pub idle_minutes: f64,
    pub mtbf_hours: f64,
    pub mttr_hours: f64,
}

impl UtilizationBreakdown {
    pub fn new(
        productive_minutes: f64,
        setup_minutes: f64,
        downtime_minutes: f64,
        idle_minutes: f64,
        failure_count: u32,
        failure_minutes: f64,
    ) -> Self {
        let mtbf_hours = safe_ratio(productive_minutes / 60.0, failure_count as f64, 0.0);
        let mttr_hours = safe_ratio(failure_minutes / 60.0, failure_count as f64, 0.0);
        Self {
            productive_minutes: round2(productive_minutes),
            setup_minutes: round2(setup_minutes),
            downtime_minutes: round2(downtime_minutes),
            idle_minutes: round2(idle_minutes.max(0.0)),
            mtbf_hours: round2(mtbf_hours),
            mttr_hours: round2(mttr_hours),
        }
    }
}
