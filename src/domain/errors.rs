//! Domain error taxonomy
//!
//! spec.md §7 splits failures into four tiers. Tier 1 ("validation errors")
//! is the only tier that aborts a run; it is the only tier with its own
//! typed error. Tiers 2-4 (cycles, per-operation placement failures,
//! numerical guards) never propagate as `Err` — they become
//! `SchedulingConflict` entries or clamp to a fallback, by design, so that
//! `schedule()`/`compute_kpis()` always return a (possibly partial) result.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchedulingError {
    #[error("no operations were supplied")]
    NoOperations,

    #[error("no machines were supplied")]
    NoMachines,

    #[error("calendar has no shifts defined")]
    NoShifts,

    #[error("unknown dispatch rule: {0}")]
    UnknownRule(String),

    #[error("horizon_hours must be positive, got {0}")]
    NonPositiveHorizon(f64),

    #[error("max_overload_percentage must not be negative, got {0}")]
    NegativeMaxOverload(f64),

    #[error("operation {operation_id} references unknown work order {work_order_id}")]
    UnknownWorkOrder {
        operation_id: String,
        work_order_id: String,
    },

    #[error("capability record references unknown machine {machine_id}")]
    UnknownMachine { machine_id: String },

    #[error("calendar shift is malformed: {0}")]
    MalformedShift(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("period end must not be before period start")]
    InvalidPeriod,
}
