//! Setup-Matrix Lookup service module (spec.md §4.4)
//!
//! Resolves the changeover time a machine needs between two operation
//! families. Resolution order per spec.md §4.4: (1) an exact
//! (from_family, to_family, machine_type) matrix entry wins; (2) with no
//! previous operation on the machine, fall back to the incoming operation's
//! own declared setup time; (3) any other matrix miss falls back to the same
//! declared setup time. There is no "same family" shortcut — a matrix miss
//! always costs the operation's own setup minutes.

use crate::domain::entities::{Operation, SetupMatrix};

/// Setup minutes required on `machine_type` to follow `previous_family` (if
/// any) with `operation`.
pub fn resolve_setup_minutes(matrix: &SetupMatrix, previous_family: Option<&str>, operation: &Operation, machine_type: &str) -> i64 {
    match previous_family {
        None => operation.setup_time_minutes_clamped(),
        Some(previous_family) => matrix
            .lookup(previous_family, &operation.operation_family, machine_type)
            .unwrap_or_else(|| operation.setup_time_minutes_clamped()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(family: &str, setup: i64) -> Operation {
        let mut operation = Operation::new("OP".into(), "WO".into(), 1, family.into(), 5.0);
        operation.setup_time_minutes = setup;
        operation
    }

    #[test]
    fn first_operation_on_a_machine_pays_its_own_declared_setup() {
        let matrix = SetupMatrix::new();
        let operation = op("FAM_A", 15);
        assert_eq!(resolve_setup_minutes(&matrix, None, &operation, "CNC"), 15);
    }

    #[test]
    fn same_family_back_to_back_with_no_matrix_entry_pays_own_declared_setup() {
        let matrix = SetupMatrix::new();
        let operation = op("FAM_A", 15);
        assert_eq!(resolve_setup_minutes(&matrix, Some("FAM_A"), &operation, "CNC"), 15);
    }

    #[test]
    fn matrix_entry_applies_even_between_identical_families() {
        let mut matrix = SetupMatrix::new();
        matrix.insert("FAM_A", "FAM_A", "CNC", 5);
        let operation = op("FAM_A", 15);
        assert_eq!(resolve_setup_minutes(&matrix, Some("FAM_A"), &operation, "CNC"), 5);
    }

    #[test]
    fn matrix_hit_overrides_the_operation_default() {
        let mut matrix = SetupMatrix::new();
        matrix.insert("FAM_A", "FAM_B", "CNC", 45);
        let operation = op("FAM_B", 15);
        assert_eq!(resolve_setup_minutes(&matrix, Some("FAM_A"), &operation, "CNC"), 45);
    }

    #[test]
    fn matrix_miss_falls_back_to_operation_default() {
        let matrix = SetupMatrix::new();
        let operation = op("FAM_B", 15);
        assert_eq!(resolve_setup_minutes(&matrix, Some("FAM_A"), &operation, "CNC"), 15);
    }
}
