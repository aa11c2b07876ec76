//! Machine capability entity module
//!
//! Binds a machine to the set of machine-types it can satisfy, plus an
//! efficiency factor specific to that (machine, capability) pairing. This is
//! the join table the feasibility filter (application/services/feasibility_filter.rs)
//! walks to find candidate machines for an operation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineCapability {
    pub machine_id: String,
    pub machine_types: HashSet<String>,
    pub efficiency_factor: f64,
}

impl MachineCapability {
    pub fn new(machine_id: String, machine_types: HashSet<String>) -> Self {
        Self {
            machine_id,
            machine_types,
            efficiency_factor: 1.0,
        }
    }

    /// An operation is feasible against this capability iff the intersection
    /// of its required machine types and this capability's machine types is
    /// non-empty (spec.md §4.3).
    pub fn satisfies(&self, required_machine_types: &HashSet<String>) -> bool {
        !self.machine_types.is_disjoint(required_machine_types)
    }
}
