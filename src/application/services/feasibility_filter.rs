//! Feasibility Filter service module (spec.md §4.3)
//!
//! Narrows the machine fleet down to the subset capable of running a given
//! operation: the machine must be available for scheduling, its machine type
//! must satisfy the operation's required machine types, and (when capability
//! records are supplied) its capability entry must also match.

use std::collections::HashSet;

use crate::domain::entities::{Machine, MachineCapability, Operation};

/// Whether a machine's capability record is an "optimal" match for an
/// operation's required machine types, or merely a trivial intersection
/// (spec.md §4.7: the non-optimal penalty applies when the two sets
/// intersect but the capability does not fully cover what the operation
/// needs). Either side being unrestricted counts as optimal — the penalty
/// only fires when both sides declare a concrete, partially-overlapping set.
pub fn is_optimal_match(required_machine_types: &HashSet<String>, capability_machine_types: &HashSet<String>) -> bool {
    if required_machine_types.is_empty() || capability_machine_types.is_empty() {
        return true;
    }
    required_machine_types.is_subset(capability_machine_types)
}

/// Machines that can run `operation`, in the order they were supplied.
pub fn feasible_machines<'a>(operation: &Operation, machines: &'a [Machine]) -> Vec<&'a Machine> {
    machines
        .iter()
        .filter(|machine| machine.is_available_for_scheduling())
        .filter(|machine| operation.machine_types.is_empty() || operation.machine_types.contains(&machine.machine_type))
        .collect()
}

/// As `feasible_machines`, but additionally requires a matching
/// `MachineCapability` record when capabilities are tracked separately from
/// the machine's own declared type (spec.md §3: capability records layer
/// efficiency factors on top of raw machine type matching).
pub fn feasible_machines_with_capabilities<'a>(
    operation: &Operation,
    machines: &'a [Machine],
    capabilities: &[MachineCapability],
) -> Vec<&'a Machine> {
    feasible_machines(operation, machines)
        .into_iter()
        .filter(|machine| {
            capabilities
                .iter()
                .find(|capability| capability.machine_id == machine.id)
                .map(|capability| capability.satisfies(&operation.machine_types))
                .unwrap_or(true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MachineStatus;
    use std::collections::HashSet;

    fn machine(id: &str, machine_type: &str, status: MachineStatus) -> Machine {
        let mut machine = Machine::new(id.into(), id.into(), machine_type.into());
        machine.status = status;
        machine
    }

    #[test]
    fn filters_by_machine_type_and_availability() {
        let mut operation = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM".into(), 5.0);
        operation.machine_types = HashSet::from(["CNC".to_string()]);
        let machines = vec![
            machine("M1", "CNC", MachineStatus::Idle),
            machine("M2", "LATHE", MachineStatus::Idle),
            machine("M3", "CNC", MachineStatus::Maintenance),
        ];
        let feasible = feasible_machines(&operation, &machines);
        assert_eq!(feasible.len(), 1);
        assert_eq!(feasible[0].id, "M1");
    }

    #[test]
    fn unrestricted_operation_accepts_any_available_machine() {
        let operation = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM".into(), 5.0);
        let machines = vec![machine("M1", "CNC", MachineStatus::Idle), machine("M2", "LATHE", MachineStatus::Running)];
        assert_eq!(feasible_machines(&operation, &machines).len(), 2);
    }

    #[test]
    fn capability_mismatch_excludes_machine_despite_matching_type() {
        let mut operation = Operation::new("OP-1".into(), "WO-1".into(), 1, "FAM".into(), 5.0);
        operation.machine_types = HashSet::from(["CNC".to_string()]);
        let machines = vec![machine("M1", "CNC", MachineStatus::Idle)];
        let capabilities = vec![MachineCapability::new("M1".into(), HashSet::from(["LATHE".to_string()]))];
        assert!(feasible_machines_with_capabilities(&operation, &machines, &capabilities).is_empty());
    }

    #[test]
    fn optimal_match_when_capability_fully_covers_required_types() {
        let required = HashSet::from(["CNC_TURNING".to_string()]);
        let capability = HashSet::from(["CNC_TURNING".to_string(), "CNC_MILLING".to_string()]);
        assert!(is_optimal_match(&required, &capability));
    }

    #[test]
    fn non_optimal_match_when_intersection_is_partial() {
        let required = HashSet::from(["CNC_TURNING".to_string(), "WIRE_CUT".to_string()]);
        let capability = HashSet::from(["CNC_TURNING".to_string()]);
        assert!(!is_optimal_match(&required, &capability));
    }

    #[test]
    fn unrestricted_sides_are_always_optimal() {
        assert!(is_optimal_match(&HashSet::new(), &HashSet::from(["CNC".to_string()])));
        assert!(is_optimal_match(&HashSet::from(["CNC".to_string()]), &HashSet::new()));
    }
}
