//! End-to-end scheduling scenarios over the full pipeline
//! (`RunScheduling::execute`), each exercising one shape spec.md §8 names:
//! a linear single-machine chain, capability-based filtering, an infeasible
//! operation, a dependency cycle, a due-date miss, and the setup matrix
//! taking effect between two consecutive families on the same machine.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use planloom::application::use_cases::{RunScheduling, SchedulingRequest};
use planloom::entities::{
    Calendar, ConflictType, DispatchRule, Machine, MachineCapability, MachineStatus, Operation, SchedulingPolicy, SetupMatrix, Shift, WorkOrder,
};

fn calendar() -> Calendar {
    Calendar::new(vec![Shift::parse("Day", "06:00", "22:00", 0).unwrap()], HashSet::from([0, 1, 2, 3, 4, 5, 6]), HashSet::new())
}

fn machine(id: &str, machine_type: &str) -> Machine {
    let mut m = Machine::new(id.into(), id.into(), machine_type.into());
    m.status = MachineStatus::Idle;
    m
}

fn work_order(id: &str, quantity: u32, created_at: chrono::DateTime<Utc>) -> WorkOrder {
    WorkOrder::new(id.into(), format!("SO-{id}"), "PN-1".into(), quantity, created_at)
}

/// Scenario A: a linear two-operation chain on a single machine places
/// both operations in order, the second starting exactly at the first's
/// end plus the policy transfer time (spec.md §8 Scenario A: 08:00-09:30
/// then 09:40-11:10, with a 10-minute transfer gap in between).
#[test]
fn scenario_a_linear_chain_on_a_single_machine() {
    let now = Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap(); // Monday
    let work_order = work_order("WO-1", 1, now);

    let mut op1 = Operation::new("OP-1".into(), "WO-1".into(), 1, "CNC_TURNING".into(), 60.0);
    op1.machine_types = HashSet::from(["CNC_TURNING".to_string()]);
    op1.setup_time_minutes = 30;
    op1.successors = HashSet::from(["OP-2".to_string()]);

    let mut op2 = Operation::new("OP-2".into(), "WO-1".into(), 2, "CNC_TURNING".into(), 60.0);
    op2.machine_types = HashSet::from(["CNC_TURNING".to_string()]);
    op2.setup_time_minutes = 30;
    op2.predecessors = HashSet::from(["OP-1".to_string()]);

    let operations = vec![op1, op2];
    let machines = vec![machine("M1", "CNC_TURNING")];
    let policy = SchedulingPolicy::new(DispatchRule::Fifo);
    let setup_matrix = SetupMatrix::new();
    let cal = Calendar::new(vec![Shift::parse("Day", "08:00", "16:00", 0).unwrap()], HashSet::from([1, 2, 3, 4, 5]), HashSet::new());

    let request = SchedulingRequest {
        plan_id: "PLAN-A".into(),
        work_orders: std::slice::from_ref(&work_order),
        operations: &operations,
        machines: &machines,
        capabilities: &[],
        setup_matrix: &setup_matrix,
        calendar: &cal,
        policy: &policy,
        now,
    };

    let result = RunScheduling::new().execute(&request).expect("valid request");
    assert_eq!(result.slots.len(), 2);
    let first = result.slots.iter().find(|s| s.operation_id == "OP-1").unwrap();
    let second = result.slots.iter().find(|s| s.operation_id == "OP-2").unwrap();
    assert_eq!(first.start, Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap());
    assert_eq!(first.end, Utc.with_ymd_and_hms(2026, 7, 27, 9, 30, 0).unwrap());
    assert_eq!(second.start, Utc.with_ymd_and_hms(2026, 7, 27, 9, 40, 0).unwrap());
    assert_eq!(second.end, Utc.with_ymd_and_hms(2026, 7, 27, 11, 10, 0).unwrap());
    assert!(result.conflicts.is_empty());
}

/// Scenario B: two machines advertise different capabilities; the operation
/// must land on the one whose capability intersects its required types.
#[test]
fn scenario_b_capability_filtering_picks_the_matching_machine() {
    let now = Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap();
    let work_order = work_order("WO-1", 4, now);

    let mut operation = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM_A".into(), 1.0);
    operation.machine_types = HashSet::from(["WIRE_CUT".to_string()]);

    let machines = vec![machine("M1", "CNC"), machine("M2", "WIRE")];
    let capabilities = vec![
        MachineCapability::new("M1".into(), HashSet::from(["CNC_TURNING".to_string()])),
        MachineCapability::new("M2".into(), HashSet::from(["WIRE_CUT".to_string()])),
    ];
    let policy = SchedulingPolicy::new(DispatchRule::Fifo);
    let setup_matrix = SetupMatrix::new();
    let cal = calendar();

    let request = SchedulingRequest {
        plan_id: "PLAN-B".into(),
        work_orders: std::slice::from_ref(&work_order),
        operations: std::slice::from_ref(&operation),
        machines: &machines,
        capabilities: &capabilities,
        setup_matrix: &setup_matrix,
        calendar: &cal,
        policy: &policy,
        now,
    };

    let result = RunScheduling::new().execute(&request).expect("valid request");
    assert_eq!(result.slots.len(), 1);
    assert_eq!(result.slots[0].machine_id, "M2");
}

/// Scenario C: no machine advertises the required type — the operation is
/// skipped with a resource conflict rather than aborting the whole run.
#[test]
fn scenario_c_infeasible_operation_raises_a_conflict_but_does_not_abort() {
    let now = Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap();
    let work_order = work_order("WO-1", 4, now);

    let mut operation = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM_A".into(), 1.0);
    operation.machine_types = HashSet::from(["EDM".to_string()]);

    let machines = vec![machine("M1", "CNC")];
    let policy = SchedulingPolicy::new(DispatchRule::Fifo);
    let setup_matrix = SetupMatrix::new();
    let cal = calendar();

    let request = SchedulingRequest {
        plan_id: "PLAN-C".into(),
        work_orders: std::slice::from_ref(&work_order),
        operations: std::slice::from_ref(&operation),
        machines: &machines,
        capabilities: &[],
        setup_matrix: &setup_matrix,
        calendar: &cal,
        policy: &policy,
        now,
    };

    let result = RunScheduling::new().execute(&request).expect("validation still passes");
    assert!(result.slots.is_empty());
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].conflict_type, ConflictType::ResourceConflict);
}

/// Scenario D: A depends on B and B depends on A. Both operations fall
/// outside every resolved topological batch and are reported via a
/// single critical precedence-violation conflict covering the cycle.
#[test]
fn scenario_d_dependency_cycle_is_excluded_and_reported() {
    let now = Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap();
    let work_order = work_order("WO-1", 4, now);

    let mut op_a = Operation::new("OP-A".into(), "WO-1".into(), 1, "FAM_A".into(), 1.0);
    op_a.machine_types = HashSet::from(["CNC".to_string()]);
    op_a.predecessors = HashSet::from(["OP-B".to_string()]);

    let mut op_b = Operation::new("OP-B".into(), "WO-1".into(), 2, "FAM_A".into(), 1.0);
    op_b.machine_types = HashSet::from(["CNC".to_string()]);
    op_b.predecessors = HashSet::from(["OP-A".to_string()]);

    let operations = vec![op_a, op_b];
    let machines = vec![machine("M1", "CNC")];
    let policy = SchedulingPolicy::new(DispatchRule::Fifo);
    let setup_matrix = SetupMatrix::new();
    let cal = calendar();

    let request = SchedulingRequest {
        plan_id: "PLAN-D".into(),
        work_orders: std::slice::from_ref(&work_order),
        operations: &operations,
        machines: &machines,
        capabilities: &[],
        setup_matrix: &setup_matrix,
        calendar: &cal,
        policy: &policy,
        now,
    };

    let result = RunScheduling::new().execute(&request).expect("cycles degrade gracefully");
    let cycle_conflicts: Vec<_> = result.conflicts.iter().filter(|c| c.conflict_type == ConflictType::PrecedenceViolation).collect();
    assert!(!cycle_conflicts.is_empty());
    assert!(result.slots.len() < operations.len());
}

/// Scenario E: an operation's only feasible placement lands after its due
/// date. It still gets a slot, but a deadline-missed conflict is raised.
#[test]
fn scenario_e_due_date_miss_is_flagged_but_still_scheduled() {
    let now = Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap();
    let work_order = work_order("WO-1", 4, now);

    let mut operation = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM_A".into(), 10.0);
    operation.machine_types = HashSet::from(["CNC".to_string()]);
    operation.due_date = Some(now + chrono::Duration::minutes(5));

    let machines = vec![machine("M1", "CNC")];
    let policy = SchedulingPolicy::new(DispatchRule::Fifo);
    let setup_matrix = SetupMatrix::new();
    let cal = calendar();

    let request = SchedulingRequest {
        plan_id: "PLAN-E".into(),
        work_orders: std::slice::from_ref(&work_order),
        operations: std::slice::from_ref(&operation),
        machines: &machines,
        capabilities: &[],
        setup_matrix: &setup_matrix,
        calendar: &cal,
        policy: &policy,
        now,
    };

    let result = RunScheduling::new().execute(&request).expect("valid request");
    assert_eq!(result.slots.len(), 1);
    assert!(result.conflicts.iter().any(|c| c.conflict_type == ConflictType::DeadlineMissed));
}

/// Scenario F: two operations of different families run back to back on
/// the same machine; the setup matrix's changeover entry for that family
/// pair, not the operation's own declared setup time, governs the gap.
#[test]
fn scenario_f_setup_matrix_entry_governs_the_changeover_between_families() {
    let now = Utc.with_ymd_and_hms(2026, 7, 27, 8, 0, 0).unwrap();
    let work_order = work_order("WO-1", 1, now);

    let mut op1 = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM_A".into(), 5.0);
    op1.machine_types = HashSet::from(["CNC".to_string()]);
    op1.setup_time_minutes = 5;

    let mut op2 = Operation::new("OP-2".into(), "WO-1".into(), 2, "FAM_B".into(), 5.0);
    op2.machine_types = HashSet::from(["CNC".to_string()]);
    op2.setup_time_minutes = 5;

    let mut setup_matrix = SetupMatrix::new();
    setup_matrix.insert("FAM_A", "FAM_B", "CNC", 45);

    let operations = vec![op1, op2];
    let machines = vec![machine("M1", "CNC")];
    let policy = SchedulingPolicy::new(DispatchRule::Fifo);
    let cal = calendar();

    let request = SchedulingRequest {
        plan_id: "PLAN-F".into(),
        work_orders: std::slice::from_ref(&work_order),
        operations: &operations,
        machines: &machines,
        capabilities: &[],
        setup_matrix: &setup_matrix,
        calendar: &cal,
        policy: &policy,
        now,
    };

    let result = RunScheduling::new().execute(&request).expect("valid request");
    assert_eq!(result.slots.len(), 2);
    let second = result.slots.iter().find(|s| s.operation_id == "OP-2").unwrap();
    assert_eq!(second.setup_minutes, 45);
}
