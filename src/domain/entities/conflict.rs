//! Scheduling conflict entity module
//!
//! Conflicts are the scheduler's "soft failure" channel: rather than
//! aborting a run, precedence cycles, infeasible operations, capacity
//! overloads, and missed due dates are all collected here so the run always
//! returns a (possibly partial) result (spec.md §7.2-7.3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    PrecedenceViolation,
    ResourceConflict,
    CapacityOverload,
    DeadlineMissed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulingConflict {
    pub conflict_type: ConflictType,
    pub severity: ConflictSeverity,
    pub description: String,
    pub affected_operations: Vec<String>,
    pub suggested_resolution: Option<String>,
}

impl SchedulingConflict {
    pub fn new(
        conflict_type: ConflictType,
        severity: ConflictSeverity,
        description: impl Into<String>,
        affected_operations: Vec<String>,
    ) -> Self {
        Self {
            conflict_type,
            severity,
            description: description.into(),
            affected_operations,
            suggested_resolution: None,
        }
    }

    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.suggested_resolution = Some(resolution.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_below_critical() {
        assert!(ConflictSeverity::Low < ConflictSeverity::Critical);
    }

    #[test]
    fn builder_attaches_suggested_resolution() {
        let conflict = SchedulingConflict::new(
            ConflictType::ResourceConflict,
            ConflictSeverity::High,
            "no feasible machine",
            vec!["OP-1".to_string()],
        )
        .with_resolution("add a capability record");
        assert_eq!(conflict.suggested_resolution.as_deref(), Some("add a capability record"));
    }
}
