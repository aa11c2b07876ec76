//! Planning/analytics input DTO module
//!
//! The CLI and the REST preview endpoint both need a fully-loaded set of
//! entities to hand to the pure use cases; these two structs are the JSON
//! shape a caller supplies them in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Calendar, Machine, MachineCapability, Operation, SchedulingPolicy, SetupMatrix, WorkOrder,
};
use crate::domain::entities::{DowntimeEvent, OperatorSession, ProductionLog, QualityRecord, ScheduleSlot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub plan_id: String,
    pub work_orders: Vec<WorkOrder>,
    pub operations: Vec<Operation>,
    pub machines: Vec<Machine>,
    #[serde(default)]
    pub capabilities: Vec<MachineCapability>,
    #[serde(default)]
    pub setup_matrix: SetupMatrix,
    pub calendar: Calendar,
    pub policy: SchedulingPolicy,
    #[serde(default = "Utc::now")]
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsInput {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    #[serde(default)]
    pub machines: Vec<Machine>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    #[serde(default)]
    pub production_logs: Vec<ProductionLog>,
    #[serde(default)]
    pub downtime_events: Vec<DowntimeEvent>,
    #[serde(default)]
    pub quality_records: Vec<QualityRecord>,
    #[serde(default)]
    pub schedule_slots: Vec<ScheduleSlot>,
    #[serde(default)]
    pub operator_sessions: Vec<OperatorSession>,
}
