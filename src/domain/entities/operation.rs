//! Operation entity module
//!
//! An operation is an atomic processing step with setup and run times, bound
//! to one work order, and linked to other operations via predecessor and
//! successor sets that define the dependency DAG the scheduler topologically
//! sorts and layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    pub id: String,
    pub work_order_id: String,
    pub operation_number: u32,
    pub operation_family: String,
    pub machine_types: HashSet<String>,
    pub required_skills: HashSet<String>,
    pub setup_time_minutes: i64,
    pub run_time_per_unit_minutes: f64,
    pub batch_size: u32,
    pub predecessors: HashSet<String>,
    pub successors: HashSet<String>,
    pub assigned_machine: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Operation {
    pub fn new(
        id: String,
        work_order_id: String,
        operation_number: u32,
        operation_family: String,
        run_time_per_unit_minutes: f64,
    ) -> Self {
        Self {
            id,
            work_order_id,
            operation_number,
            operation_family,
            machine_types: HashSet::new(),
            required_skills: HashSet::new(),
            setup_time_minutes: 0,
            run_time_per_unit_minutes,
            batch_size: 1,
            predecessors: HashSet::new(),
            successors: HashSet::new(),
            assigned_machine: None,
            due_date: None,
        }
    }

    /// Total quantity this operation must process, given its owning work
    /// order's ordered quantity (operations schedule for the full remaining
    /// quantity, not the batch size — batch size only bounds how it is run).
    pub fn run_minutes_for(&self, quantity: u32) -> f64 {
        self.run_time_per_unit_minutes * quantity as f64
    }

    /// Whether `other_id` is declared as a predecessor or, symmetrically,
    /// declares this operation as one of its successors. Used to validate
    /// mutual consistency of the predecessor/successor sets (spec.md
    /// invariant: "if B lists A as predecessor, A lists B as successor").
    pub fn is_mutually_consistent_with(&self, predecessor: &Operation) -> bool {
        if self.predecessors.contains(&predecessor.id) {
            predecessor.successors.contains(&self.id)
        } else {
            true
        }
    }

    pub fn setup_time_minutes_clamped(&self) -> i64 {
        self.setup_time_minutes.max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: &str) -> Operation {
        Operation::new(id.into(), "WO-1".into(), 10, "FAM_A".into(), 15.0)
    }

    #[test]
    fn run_minutes_scales_with_quantity() {
        let operation = op("OP-1");
        assert_eq!(operation.run_minutes_for(4), 60.0);
    }

    #[test]
    fn mutual_consistency_detects_missing_successor_link() {
        let mut a = op("OP-A");
        let mut b = op("OP-B");
        b.predecessors.insert(a.id.clone());
        // a does not declare b as a successor yet
        assert!(!b.is_mutually_consistent_with(&a));
        a.successors.insert(b.id.clone());
        assert!(b.is_mutually_consistent_with(&a));
    }

    #[test]
    fn negative_setup_time_clamps_to_zero() {
        let mut operation = op("OP-1");
        operation.setup_time_minutes = -5;
        assert_eq!(operation.setup_time_minutes_clamped(), 0);
    }
}
