//! Machine entity module
//!
//! Machines are the scheduler's resources: a feasible operation is placed on
//! a machine whose declared capabilities intersect the operation's required
//! machine types, subject to that machine's calendar and existing load.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    Running,
    Idle,
    Setup,
    Maintenance,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    pub id: String,
    pub name: String,
    pub machine_type: String,
    pub status: MachineStatus,
    pub efficiency: f64,
    pub location: Option<String>,
    pub current_operation: Option<String>,
}

impl Machine {
    pub fn new(id: String, name: String, machine_type: String) -> Self {
        Self {
            id,
            name,
            machine_type,
            status: MachineStatus::Idle,
            efficiency: 1.0,
            location: None,
            current_operation: None,
        }
    }

    /// Efficiency clamped into (0.01, 1.0] so scheduling math never divides
    /// by zero or amplifies runtimes unboundedly (spec.md §4.7).
    pub fn clamped_efficiency(&self) -> f64 {
        self.efficiency.clamp(0.01, 1.0)
    }

    pub fn is_available_for_scheduling(&self) -> bool {
        !matches!(self.status, MachineStatus::Maintenance | MachineStatus::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_efficiency_floors_at_point_zero_one() {
        let mut m = Machine::new("M1".into(), "Lathe 1".into(), "CNC_TURNING".into());
        m.efficiency = 0.0;
        assert_eq!(m.clamped_efficiency(), 0.01);
        m.efficiency = -2.0;
        assert_eq!(m.clamped_efficiency(), 0.01);
        m.efficiency = 1.5;
        assert_eq!(m.clamped_efficiency(), 1.0);
    }

    #[test]
    fn maintenance_machine_is_unavailable() {
        let mut m = Machine::new("M1".into(), "Lathe 1".into(), "CNC_TURNING".into());
        m.status = MachineStatus::Maintenance;
        assert!(!m.is_available_for_scheduling());
    }
}
