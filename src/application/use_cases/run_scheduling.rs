//! Run Scheduling use case module
//!
//! Orchestrates the full scheduling pipeline (spec.md §4.7): validate
//! preconditions, topologically batch operations, dispatch each batch by the
//! configured rule, place every operation on its best feasible machine, and
//! bucket the resulting slots into per-machine daily capacity. The whole
//! pipeline is a pure function of its inputs — nothing here touches a
//! repository; that happens at the presentation/web layer.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::application::services::{capacity_bucketing, dispatch, feasibility_filter, placement_engine, setup_lookup, DependencyGraph};
use crate::domain::entities::{
    Calendar, CapacityBucket, ConflictSeverity, ConflictType, Machine, MachineCapability, Operation, ScheduleSlot, SchedulingConflict, SchedulingPolicy, SetupMatrix, WorkOrder,
};
use crate::domain::errors::SchedulingError;

pub struct SchedulingRequest<'a> {
    pub plan_id: String,
    pub work_orders: &'a [WorkOrder],
    pub operations: &'a [Operation],
    pub machines: &'a [Machine],
    pub capabilities: &'a [MachineCapability],
    pub setup_matrix: &'a SetupMatrix,
    pub calendar: &'a Calendar,
    pub policy: &'a SchedulingPolicy,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub slots: Vec<ScheduleSlot>,
    pub buckets: Vec<CapacityBucket>,
    pub conflicts: Vec<SchedulingConflict>,
}

/// Use case that runs the scheduling pipeline against a fully-loaded set of
/// entities and a policy.
pub struct RunScheduling;

impl RunScheduling {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, request: &SchedulingRequest) -> Result<SchedulingResult, SchedulingError> {
        validate_preconditions(request)?;

        let operation_refs: Vec<&Operation> = request.operations.iter().collect();
        let graph = DependencyGraph::build(&operation_refs);
        let batches = graph.topological_batches();
        let cyclic_ids = cyclic_operation_ids(&graph, &operation_refs, &batches);

        let work_orders_by_id: HashMap<&str, &WorkOrder> = request.work_orders.iter().map(|wo| (wo.id.as_str(), wo)).collect();
        let operations_by_id: HashMap<&str, &Operation> = request.operations.iter().map(|op| (op.id.as_str(), op)).collect();

        let mut conflicts = Vec::new();
        if !cyclic_ids.is_empty() {
            conflicts.push(SchedulingConflict::new(
                ConflictType::PrecedenceViolation,
                ConflictSeverity::Critical,
                "operations on a dependency cycle were excluded from scheduling",
                cyclic_ids,
            ));
        }

        let mut machine_cursor: HashMap<&str, DateTime<Utc>> = HashMap::new();
        let mut machine_last_family: HashMap<&str, String> = HashMap::new();
        let mut machine_busy: HashMap<&str, Vec<(DateTime<Utc>, DateTime<Utc>)>> = HashMap::new();
        let mut operation_end: HashMap<&str, DateTime<Utc>> = HashMap::new();
        let mut slots = Vec::new();
        let horizon_end = request.now + Duration::minutes((request.policy.horizon_hours * 60.0) as i64);

        for batch in &batches {
            let mut batch_operations: Vec<&Operation> = batch
                .iter()
                .filter_map(|id| operations_by_id.get(id.as_str()).copied())
                .collect();
            batch_operations.sort_by(|a, b| {
                let wo_a = work_orders_by_id.get(a.work_order_id.as_str());
                let wo_b = work_orders_by_id.get(b.work_order_id.as_str());
                let (Some(wo_a), Some(wo_b)) = (wo_a, wo_b) else {
                    return a.id.cmp(&b.id);
                };
                dispatch::priority_score(request.policy.rule, a, *wo_a, request.now)
                    .partial_cmp(&dispatch::priority_score(request.policy.rule, b, *wo_b, request.now))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });

            for operation in batch_operations {
                let Some(&work_order) = work_orders_by_id.get(operation.work_order_id.as_str()) else {
                    continue; // already rejected by validate_preconditions
                };
                let remaining_quantity = work_order.quantity.saturating_sub(work_order.completed_quantity);

                let known_predecessors: Vec<&str> = operation
                    .predecessors
                    .iter()
                    .map(|id| id.as_str())
                    .filter(|id| operations_by_id.contains_key(id))
                    .collect();
                let unready_predecessors: Vec<&str> = known_predecessors.iter().filter(|id| !operation_end.contains_key(*id)).copied().collect();
                if !unready_predecessors.is_empty() {
                    conflicts.push(SchedulingConflict::new(
                        ConflictType::PrecedenceViolation,
                        ConflictSeverity::High,
                        format!("operation {} skipped: predecessor(s) {} not yet scheduled", operation.id, unready_predecessors.join(", ")),
                        vec![operation.id.clone()],
                    ));
                    continue;
                }

                let predecessor_ready_at = known_predecessors
                    .iter()
                    .filter_map(|predecessor_id| operation_end.get(predecessor_id))
                    .max()
                    .copied()
                    .map(|end| end + Duration::minutes(request.policy.transfer_time_minutes))
                    .unwrap_or(request.now);

                let feasible = feasibility_filter::feasible_machines_with_capabilities(operation, request.machines, request.capabilities);
                if feasible.is_empty() {
                    conflicts.push(SchedulingConflict::new(
                        ConflictType::ResourceConflict,
                        ConflictSeverity::High,
                        format!("no feasible machine for operation {}", operation.id),
                        vec![operation.id.clone()],
                    ));
                    continue;
                }

                let mut best: Option<(DateTime<Utc>, &Machine, i64, i64)> = None;
                for machine in feasible.iter().copied() {
                    let machine_available_from = machine_cursor.get(machine.id.as_str()).copied().unwrap_or(request.now);
                    let setup_minutes = setup_lookup::resolve_setup_minutes(request.setup_matrix, machine_last_family.get(machine.id.as_str()).map(|s| s.as_str()), operation, &machine.machine_type);
                    let capability_types = request
                        .capabilities
                        .iter()
                        .find(|capability| capability.machine_id == machine.id)
                        .map(|capability| &capability.machine_types);
                    let mut run_minutes = (operation.run_minutes_for(remaining_quantity) / machine.clamped_efficiency()).ceil() as i64;
                    if let Some(capability_types) = capability_types {
                        if !feasibility_filter::is_optimal_match(&operation.machine_types, capability_types) {
                            run_minutes = ((run_minutes as f64) * 1.2).round() as i64;
                        }
                    }
                    let duration_minutes = setup_minutes + run_minutes;
                    let busy = machine_busy.get(machine.id.as_str()).cloned().unwrap_or_default();
                    if let Some(machine_available_start) = placement_engine::find_earliest_start(request.calendar, &busy, machine_available_from, duration_minutes, horizon_end) {
                        let start = machine_available_start.max(predecessor_ready_at);
                        if best.map(|(best_start, ..)| start < best_start).unwrap_or(true) {
                            best = Some((start, machine, setup_minutes, run_minutes));
                        }
                    }
                }

                let Some((start, machine, setup_minutes, run_minutes)) = best else {
                    conflicts.push(SchedulingConflict::new(
                        ConflictType::ResourceConflict,
                        ConflictSeverity::Critical,
                        format!("no admissible placement found for operation {} within the planning horizon", operation.id),
                        vec![operation.id.clone()],
                    ));
                    continue;
                };

                let priority_score = dispatch::priority_score(request.policy.rule, operation, work_order, request.now);
                let slot = ScheduleSlot::new(
                    format!("{}-{}", request.plan_id, operation.id),
                    request.plan_id.clone(),
                    work_order.id.clone(),
                    operation.id.clone(),
                    machine.id.clone(),
                    start,
                    setup_minutes,
                    run_minutes,
                    remaining_quantity,
                    priority_score,
                    request.policy.rule,
                );

                if let Some(due_date) = operation.due_date {
                    if slot.end > due_date {
                        conflicts.push(SchedulingConflict::new(
                            ConflictType::DeadlineMissed,
                            ConflictSeverity::High,
                            format!("operation {} is placed past its due date", operation.id),
                            vec![operation.id.clone()],
                        ));
                    }
                }

                machine_cursor.insert(machine.id.as_str(), slot.end);
                machine_last_family.insert(machine.id.as_str(), operation.operation_family.clone());
                machine_busy.entry(machine.id.as_str()).or_default().push((slot.start, slot.end));
                operation_end.insert(operation.id.as_str(), slot.end);
                slots.push(slot);
            }
        }

        let mut buckets = Vec::new();
        for machine in request.machines {
            let machine_slots: Vec<&ScheduleSlot> = slots.iter().filter(|slot| slot.machine_id == machine.id && slot.is_active()).collect();
            let mut touched_dates: Vec<chrono::NaiveDate> = machine_slots.iter().map(|slot| slot.start.date_naive()).collect();
            touched_dates.sort();
            touched_dates.dedup();
            for date in touched_dates {
                buckets.extend(capacity_bucketing::build_buckets(&machine.id, request.calendar, &machine_slots, date, date));
            }
        }
        for bucket in &buckets {
            if request.policy.allow_overload && bucket.is_overloaded() && bucket.overload_percentage() > request.policy.max_overload_percentage {
                conflicts.push(SchedulingConflict::new(
                    ConflictType::CapacityOverload,
                    ConflictSeverity::Medium,
                    format!("machine {} is overloaded on {} ({:.1}% over capacity)", bucket.machine_id, bucket.date, bucket.overload_percentage()),
                    Vec::new(),
                ));
            }
        }

        Ok(SchedulingResult { slots, buckets, conflicts })
    }
}

impl Default for RunScheduling {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_preconditions(request: &SchedulingRequest) -> Result<(), SchedulingError> {
    if request.operations.is_empty() {
        return Err(SchedulingError::NoOperations);
    }
    if request.machines.is_empty() {
        return Err(SchedulingError::NoMachines);
    }
    if request.calendar.shifts.is_empty() {
        return Err(SchedulingError::NoShifts);
    }
    request
        .policy
        .validate()
        .map_err(|_| {
            if request.policy.horizon_hours <= 0.0 {
                SchedulingError::NonPositiveHorizon(request.policy.horizon_hours)
            } else {
                SchedulingError::NegativeMaxOverload(request.policy.max_overload_percentage)
            }
        })?;
    let work_order_ids: HashSet<&str> = request.work_orders.iter().map(|wo| wo.id.as_str()).collect();
    for operation in request.operations {
        if !work_order_ids.contains(operation.work_order_id.as_str()) {
            return Err(SchedulingError::UnknownWorkOrder {
                operation_id: operation.id.clone(),
                work_order_id: operation.work_order_id.clone(),
            });
        }
    }
    let machine_ids: HashSet<&str> = request.machines.iter().map(|m| m.id.as_str()).collect();
    for capability in request.capabilities {
        if !machine_ids.contains(capability.machine_id.as_str()) {
            return Err(SchedulingError::UnknownMachine { machine_id: capability.machine_id.clone() });
        }
    }
    if let Err(message) = request.calendar.validate() {
        return Err(SchedulingError::MalformedShift(message));
    }
    Ok(())
}

/// Operation ids that participate in a dependency cycle: present in the
/// graph but absent from every resolved batch.
fn cyclic_operation_ids(graph: &DependencyGraph, operations: &[&Operation], batches: &[Vec<String>]) -> Vec<String> {
    if !graph.has_cycle() {
        return Vec::new();
    }
    let batched: HashSet<&str> = batches.iter().flatten().map(|s| s.as_str()).collect();
    operations.iter().map(|o| o.id.clone()).filter(|id| !batched.contains(id.as_str())).collect()
}
