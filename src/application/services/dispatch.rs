//! Dispatch Rule service module (spec.md §4.5)
//!
//! Scores an operation under one of the five dispatch rules. A batch is
//! ordered by ascending score: the lowest-scoring operation in a
//! dependency-resolved batch is placed first. `Fifo` and `Priority` never
//! produce ties that matter operationally, but `Edd`/`Spt`/`Cr` fall back to
//! work-order creation time (FIFO) to keep ordering deterministic.

use chrono::{DateTime, Utc};

use crate::domain::entities::{DispatchRule, Operation, WorkOrder};
use crate::domain::value_objects::rounding::safe_ratio;

/// Dispatch priority score for `operation` under `rule`; lower dispatches
/// earlier. `now` anchors the EDD/CR reference time and is otherwise unused.
///
/// EDD and CR key off the *work order's* planned end date (spec.md §4.6),
/// not the operation's own due date — the due date drives `deadline_missed`
/// conflict detection in the main loop, a separate concern.
pub fn priority_score(rule: DispatchRule, operation: &Operation, work_order: &WorkOrder, now: DateTime<Utc>) -> f64 {
    match rule {
        DispatchRule::Edd => due_date_score(work_order, now),
        DispatchRule::Spt => processing_time_score(operation, work_order),
        DispatchRule::Cr => critical_ratio_score(operation, work_order, now),
        DispatchRule::Fifo => work_order.created_at.timestamp() as f64,
        DispatchRule::Priority => work_order.priority.rank() as f64,
    }
}

fn due_date_score(work_order: &WorkOrder, reference_time: DateTime<Utc>) -> f64 {
    work_order
        .planned_end
        .map(|due| (due - reference_time).num_milliseconds() as f64)
        .unwrap_or(f64::MAX)
}

fn processing_time_score(operation: &Operation, work_order: &WorkOrder) -> f64 {
    let quantity = work_order.quantity.saturating_sub(work_order.completed_quantity);
    operation.setup_time_minutes_clamped() as f64 + operation.run_minutes_for(quantity)
}

/// Critical ratio = (planned_end - reference) / (run_per_unit * quantity * 60000)
/// (spec.md §4.6). Below 1.0 the operation is already behind schedule; the
/// lower the ratio, the more urgent. A work order with no planned end date
/// is least urgent.
fn critical_ratio_score(operation: &Operation, work_order: &WorkOrder, now: DateTime<Utc>) -> f64 {
    let Some(planned_end) = work_order.planned_end else {
        return f64::MAX;
    };
    let remaining_ms = (planned_end - now).num_milliseconds() as f64;
    let quantity = work_order.quantity.saturating_sub(work_order.completed_quantity);
    let processing_ms = operation.run_time_per_unit_minutes * quantity as f64 * 60_000.0;
    safe_ratio(remaining_ms, processing_ms, f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn work_order(created_at: DateTime<Utc>) -> WorkOrder {
        WorkOrder::new("WO-1".into(), "SO-1".into(), "PN-1".into(), 10, created_at)
    }

    fn work_order_due(planned_end_minutes_from_now: Option<i64>, now: DateTime<Utc>) -> WorkOrder {
        let mut work_order = work_order(now);
        work_order.planned_end = planned_end_minutes_from_now.map(|m| now + Duration::minutes(m));
        work_order
    }

    fn operation() -> Operation {
        Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM".into(), 5.0)
    }

    #[test]
    fn edd_scores_earlier_planned_end_lower() {
        let now = Utc::now();
        let operation = operation();
        let urgent = work_order_due(Some(60), now);
        let relaxed = work_order_due(Some(600), now);
        assert!(priority_score(DispatchRule::Edd, &operation, &urgent, now) < priority_score(DispatchRule::Edd, &operation, &relaxed, now));
    }

    #[test]
    fn edd_treats_missing_planned_end_as_least_urgent() {
        let now = Utc::now();
        let operation = operation();
        let no_due = work_order_due(None, now);
        let has_due = work_order_due(Some(60), now);
        assert!(priority_score(DispatchRule::Edd, &operation, &no_due, now) > priority_score(DispatchRule::Edd, &operation, &has_due, now));
    }

    #[test]
    fn spt_prefers_shorter_processing_time() {
        let now = Utc::now();
        let mut short = operation();
        short.run_time_per_unit_minutes = 1.0;
        let mut long = operation();
        long.run_time_per_unit_minutes = 50.0;
        let work_order = work_order(now);
        assert!(priority_score(DispatchRule::Spt, &short, &work_order, now) < priority_score(DispatchRule::Spt, &long, &work_order, now));
    }

    #[test]
    fn cr_below_one_means_already_behind_schedule() {
        let now = Utc::now();
        let mut behind = operation();
        behind.run_time_per_unit_minutes = 100.0;
        let work_order = work_order_due(Some(5), now);
        assert!(priority_score(DispatchRule::Cr, &behind, &work_order, now) < 1.0);
    }

    #[test]
    fn cr_treats_missing_planned_end_as_least_urgent() {
        let now = Utc::now();
        let operation = operation();
        let work_order = work_order_due(None, now);
        assert_eq!(priority_score(DispatchRule::Cr, &operation, &work_order, now), f64::MAX);
    }

    #[test]
    fn priority_rule_scores_by_work_order_rank() {
        let now = Utc::now();
        let operation = operation();
        let mut urgent_wo = work_order(now);
        urgent_wo.priority = crate::domain::entities::Priority::Urgent;
        let mut low_wo = work_order(now);
        low_wo.priority = crate::domain::entities::Priority::Low;
        assert!(priority_score(DispatchRule::Priority, &operation, &urgent_wo, now) < priority_score(DispatchRule::Priority, &operation, &low_wo, now));
    }
}
