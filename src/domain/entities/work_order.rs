//! Work order entity module
//!
//! A work order is a customer/production request for a quantity of a part,
//! decomposed into operations. It carries its own lifecycle status and the
//! planned/actual timestamps the scheduler and analytics engine reason about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dispatch/business priority of a work order.
///
/// Ordered from most to least urgent; `PRIORITY` dispatch scores a work
/// order by the discriminant below (urgent = 1 .. low = 4, lower sorts first).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Priority {
    /// Numeric rank used by the PRIORITY dispatch rule (lower = scheduled earlier).
    pub fn rank(&self) -> u32 {
        match self {
            Priority::Urgent => 1,
            Priority::High => 2,
            Priority::Normal => 3,
            Priority::Low => 4,
        }
    }
}

/// Lifecycle status of a work order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    Setup,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

/// A customer/production request for a quantity of a part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkOrder {
    pub id: String,
    pub order_number: String,
    pub part_number: String,
    pub part_name: Option<String>,
    pub quantity: u32,
    pub completed_quantity: u32,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub assigned_machine: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl WorkOrder {
    pub fn new(
        id: String,
        order_number: String,
        part_number: String,
        quantity: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_number,
            part_number,
            part_name: None,
            quantity,
            completed_quantity: 0,
            priority: Priority::Normal,
            status: WorkOrderStatus::Pending,
            planned_start: None,
            planned_end: None,
            actual_start: None,
            actual_end: None,
            assigned_machine: None,
            estimated_hours: None,
            actual_hours: None,
            created_at,
        }
    }

    /// Validates the invariants spec.md holds a work order to: planned_end is
    /// never before planned_start, and completed quantity never exceeds the
    /// ordered quantity.
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(start), Some(end)) = (self.planned_start, self.planned_end) {
            if end < start {
                return Err(format!(
                    "work order {} has planned_end before planned_start",
                    self.id
                ));
            }
        }
        if self.completed_quantity > self.quantity {
            return Err(format!(
                "work order {} has completed_quantity {} exceeding quantity {}",
                self.id, self.completed_quantity, self.quantity
            ));
        }
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            WorkOrderStatus::Completed | WorkOrderStatus::Cancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wo() -> WorkOrder {
        WorkOrder::new(
            "WO-1".into(),
            "SO-1001".into(),
            "PN-42".into(),
            10,
            Utc::now(),
        )
    }

    #[test]
    fn priority_rank_orders_urgent_first() {
        assert!(Priority::Urgent.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Normal.rank());
        assert!(Priority::Normal.rank() < Priority::Low.rank());
    }

    #[test]
    fn validate_rejects_completed_over_quantity() {
        let mut order = wo();
        order.completed_quantity = 11;
        assert!(order.validate().is_err());
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let mut order = wo();
        let now = Utc::now();
        order.planned_start = Some(now);
        order.planned_end = Some(now - chrono::Duration::minutes(1));
        assert!(order.validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_order() {
        assert!(wo().validate().is_ok());
    }
}
