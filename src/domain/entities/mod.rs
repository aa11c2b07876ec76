pub mod work_order;
pub mod operation;
pub mod machine;
pub mod machine_capability;
pub mod calendar;
pub mod setup_matrix;
pub mod schedule_slot;
pub mod capacity_bucket;
pub mod scheduling_policy;
pub mod conflict;
pub mod production_log;
pub mod downtime_event;
pub mod quality_record;
pub mod operator_session;

pub use work_order::{WorkOrder, WorkOrderStatus, Priority};
pub use operation::Operation;
pub use machine::{Machine, MachineStatus};
pub use machine_capability::MachineCapability;
pub use calendar::{Calendar, Shift};
pub use setup_matrix::{SetupMatrix, SetupMatrixEntry};
pub use schedule_slot::{ScheduleSlot, SlotStatus};
pub use capacity_bucket::CapacityBucket;
pub use scheduling_policy::{SchedulingPolicy, DispatchRule};
pub use conflict::{SchedulingConflict, ConflictType, ConflictSeverity};
pub use production_log::ProductionLog;
pub use downtime_event::DowntimeEvent;
pub use quality_record::{QualityRecord, QualityResult};
pub use operator_session::OperatorSession;
