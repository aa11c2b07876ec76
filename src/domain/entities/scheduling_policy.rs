//! Scheduling policy entity module
//!
//! Carries the knobs the main scheduling loop (application::use_cases::run_scheduling)
//! reads: which dispatch rule orders each batch, how far ahead to plan, and
//! how much overload to tolerate before flagging a conflict.

use serde::{Deserialize, Serialize};

/// Dispatching heuristic used to order operations within a dependency batch.
/// A closed sum type per spec.md §9 Design Notes — adding a rule means
/// adding a variant and one arm in `application::services::dispatch`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum DispatchRule {
    /// Earliest due date.
    Edd,
    /// Shortest processing time.
    Spt,
    /// Critical ratio.
    Cr,
    /// First in, first out (by work order creation time).
    Fifo,
    /// Fixed business priority (urgent/high/normal/low).
    Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulingPolicy {
    pub rule: DispatchRule,
    pub horizon_hours: f64,
    pub allow_overload: bool,
    pub max_overload_percentage: f64,
    /// Fixed handoff buffer between a predecessor's end and a successor's
    /// earliest start. spec.md §9 flags the hard-coded 10-minute default as
    /// an open question for the business to confirm; exposing it here as a
    /// policy field (rather than a buried constant) is how this repo
    /// resolves that question — see DESIGN.md.
    pub transfer_time_minutes: i64,
}

impl SchedulingPolicy {
    pub fn new(rule: DispatchRule) -> Self {
        Self {
            rule,
            horizon_hours: 168.0,
            allow_overload: false,
            max_overload_percentage: 20.0,
            transfer_time_minutes: 10,
        }
    }

    /// Validates the policy-level preconditions scheduling refuses to run
    /// without (spec.md §7.1).
    pub fn validate(&self) -> Result<(), String> {
        if self.horizon_hours <= 0.0 {
            return Err("horizon_hours must be positive".to_string());
        }
        if self.max_overload_percentage < 0.0 {
            return Err("max_overload_percentage must not be negative".to_string());
        }
        Ok(())
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self::new(DispatchRule::Fifo)
    }
}
